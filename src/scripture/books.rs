//! The 66 books of the Protestant canon, in canonical order.

/// A book with its common abbreviation and chapter count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BibleBook {
    pub name: &'static str,
    pub abbrev: &'static str,
    pub chapters: u32,
}

impl BibleBook {
    const fn new(name: &'static str, abbrev: &'static str, chapters: u32) -> Self {
        Self {
            name,
            abbrev,
            chapters,
        }
    }
}

pub const BIBLE_BOOKS: [BibleBook; 66] = [
    BibleBook::new("Genesis", "Gen", 50),
    BibleBook::new("Exodus", "Exod", 40),
    BibleBook::new("Leviticus", "Lev", 27),
    BibleBook::new("Numbers", "Num", 36),
    BibleBook::new("Deuteronomy", "Deut", 34),
    BibleBook::new("Joshua", "Josh", 24),
    BibleBook::new("Judges", "Judg", 21),
    BibleBook::new("Ruth", "Ruth", 4),
    BibleBook::new("1 Samuel", "1Sam", 31),
    BibleBook::new("2 Samuel", "2Sam", 24),
    BibleBook::new("1 Kings", "1Kgs", 22),
    BibleBook::new("2 Kings", "2Kgs", 25),
    BibleBook::new("1 Chronicles", "1Chr", 29),
    BibleBook::new("2 Chronicles", "2Chr", 36),
    BibleBook::new("Ezra", "Ezra", 10),
    BibleBook::new("Nehemiah", "Neh", 13),
    BibleBook::new("Esther", "Esth", 10),
    BibleBook::new("Job", "Job", 42),
    BibleBook::new("Psalms", "Ps", 150),
    BibleBook::new("Proverbs", "Prov", 31),
    BibleBook::new("Ecclesiastes", "Eccl", 12),
    BibleBook::new("Song of Solomon", "Song", 8),
    BibleBook::new("Isaiah", "Isa", 66),
    BibleBook::new("Jeremiah", "Jer", 52),
    BibleBook::new("Lamentations", "Lam", 5),
    BibleBook::new("Ezekiel", "Ezek", 48),
    BibleBook::new("Daniel", "Dan", 12),
    BibleBook::new("Hosea", "Hos", 14),
    BibleBook::new("Joel", "Joel", 3),
    BibleBook::new("Amos", "Amos", 9),
    BibleBook::new("Obadiah", "Obad", 1),
    BibleBook::new("Jonah", "Jonah", 4),
    BibleBook::new("Micah", "Mic", 7),
    BibleBook::new("Nahum", "Nah", 3),
    BibleBook::new("Habakkuk", "Hab", 3),
    BibleBook::new("Zephaniah", "Zeph", 3),
    BibleBook::new("Haggai", "Hag", 2),
    BibleBook::new("Zechariah", "Zech", 14),
    BibleBook::new("Malachi", "Mal", 4),
    BibleBook::new("Matthew", "Matt", 28),
    BibleBook::new("Mark", "Mark", 16),
    BibleBook::new("Luke", "Luke", 24),
    BibleBook::new("John", "John", 21),
    BibleBook::new("Acts", "Acts", 28),
    BibleBook::new("Romans", "Rom", 16),
    BibleBook::new("1 Corinthians", "1Cor", 16),
    BibleBook::new("2 Corinthians", "2Cor", 13),
    BibleBook::new("Galatians", "Gal", 6),
    BibleBook::new("Ephesians", "Eph", 6),
    BibleBook::new("Philippians", "Phil", 4),
    BibleBook::new("Colossians", "Col", 4),
    BibleBook::new("1 Thessalonians", "1Thess", 5),
    BibleBook::new("2 Thessalonians", "2Thess", 3),
    BibleBook::new("1 Timothy", "1Tim", 6),
    BibleBook::new("2 Timothy", "2Tim", 4),
    BibleBook::new("Titus", "Titus", 3),
    BibleBook::new("Philemon", "Phlm", 1),
    BibleBook::new("Hebrews", "Heb", 13),
    BibleBook::new("James", "Jas", 5),
    BibleBook::new("1 Peter", "1Pet", 5),
    BibleBook::new("2 Peter", "2Pet", 3),
    BibleBook::new("1 John", "1John", 5),
    BibleBook::new("2 John", "2John", 1),
    BibleBook::new("3 John", "3John", 1),
    BibleBook::new("Jude", "Jude", 1),
    BibleBook::new("Revelation", "Rev", 22),
];

/// Resolve a typed book name. Whitespace is collapsed and case ignored; the
/// first book (in canonical order) whose name or abbreviation equals the
/// input, or whose name starts with it, wins. `"ps"` is Psalms, `"j"` is
/// Joshua.
pub fn find_book(name: &str) -> Option<&'static BibleBook> {
    let normalized = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    BIBLE_BOOKS.iter().find(|book| {
        let full = book.name.to_lowercase();
        full == normalized || book.abbrev.to_lowercase() == normalized || full.starts_with(&normalized)
    })
}
