//! The comma-separated data file.
//!
//! Each animal occupies one line of four fields:
//!
//! ```text
//! Kind,Name,Age,Attribute
//! ```
//!
//! Fields are not quoted or escaped, so a name or attribute containing a
//! comma produces a line that cannot be read back.

use std::{
    fs::{File, OpenOptions},
    io::{self, BufRead, BufReader, BufWriter, Read, Seek, SeekFrom, Write},
    num::ParseIntError,
    path::{Path, PathBuf},
    str::Utf8Error,
};

use crate::domain::{Animal, Kind, UnknownKindError};

/// Error returned when the data file cannot be read or written.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The file could not be opened, created, read or written.
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying I/O failure.
        source: io::Error,
    },
}

impl Error {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Reasons a single line of the data file is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LineError {
    /// The line does not split into exactly four fields.
    #[error("expected 4 comma-separated fields, found {0}")]
    FieldCount(usize),

    /// The age field is not a non-negative integer.
    #[error("invalid age '{value}': {source}")]
    InvalidAge {
        /// The offending field.
        value: String,
        /// Why it failed to parse.
        source: ParseIntError,
    },

    /// The kind field names neither a cat nor a dog.
    #[error(transparent)]
    UnknownKind(#[from] UnknownKindError),

    /// The line is not valid UTF-8.
    #[error("line is not valid UTF-8: {0}")]
    Encoding(#[from] Utf8Error),
}

/// A line that was skipped while loading.
#[derive(Debug, PartialEq, Eq)]
pub struct SkippedLine {
    /// One-based line number within the file.
    pub line_number: usize,
    /// The text of the line, with invalid UTF-8 replaced.
    pub content: String,
    /// Why the line was rejected.
    pub reason: LineError,
}

/// The result of reading a data file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Loaded {
    /// Animals parsed successfully, in file order.
    pub animals: Vec<Animal>,
    /// Lines that could not be parsed.
    pub skipped: Vec<SkippedLine>,
}

/// Formats a single animal as a line of the data file, without the trailing
/// newline.
#[must_use]
pub fn format_line(animal: &Animal) -> String {
    format!(
        "{},{},{},{}",
        animal.kind(),
        animal.name(),
        animal.age(),
        animal.attribute()
    )
}

/// Parses a single line of the data file.
///
/// Fields are trimmed before they are interpreted.
///
/// # Errors
///
/// Returns an error if the line does not have exactly four fields, if the
/// age is not a non-negative integer, or if the kind is not recognised.
pub fn parse_line(line: &str) -> Result<Animal, LineError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [kind, name, age, attribute] = fields[..] else {
        return Err(LineError::FieldCount(fields.len()));
    };

    let age = age.parse::<u32>().map_err(|source| LineError::InvalidAge {
        value: age.to_string(),
        source,
    })?;
    let kind: Kind = kind.parse()?;

    Ok(Animal::new(
        kind,
        name.to_string(),
        age,
        attribute.to_string(),
    ))
}

/// Writes each animal on its own line.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_animals<'a, W, I>(writer: &mut W, animals: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Animal>,
{
    for animal in animals {
        writeln!(writer, "{}", format_line(animal))?;
    }
    writer.flush()
}

/// Reads animals from `reader`, collecting malformed lines instead of
/// failing on them.
///
/// Blank lines are ignored.
///
/// # Errors
///
/// Returns an error only if reading from `reader` fails.
pub fn read_animals<R: BufRead>(mut reader: R) -> io::Result<Loaded> {
    let mut loaded = Loaded::default();
    let mut buffer = Vec::new();
    let mut line_number = 0;

    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }
        line_number += 1;

        let bytes = buffer.strip_suffix(b"\n").unwrap_or(&buffer[..]);
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);

        let parsed = match std::str::from_utf8(bytes) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => parse_line(line),
            Err(e) => Err(LineError::from(e)),
        };

        match parsed {
            Ok(animal) => loaded.animals.push(animal),
            Err(reason) => {
                tracing::warn!(line_number, %reason, "skipping malformed line");
                loaded.skipped.push(SkippedLine {
                    line_number,
                    content: String::from_utf8_lossy(bytes).into_owned(),
                    reason,
                });
            }
        }
    }

    Ok(loaded)
}

/// Saves `animals` to `path`, replacing the file if it exists.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save(path: &Path, animals: &[Animal]) -> Result<(), Error> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_animals(&mut writer, animals).map_err(|e| Error::io(path, e))?;
    tracing::info!(count = animals.len(), path = %path.display(), "saved animals");
    Ok(())
}

/// Adds a single animal to the end of `path`, creating the file if needed.
///
/// Existing lines are left exactly as they are, including any that would be
/// skipped on load.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, read or written.
pub fn append(path: &Path, animal: &Animal) -> Result<(), Error> {
    let mut file = OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;

    let separator = if ends_mid_line(&mut file).map_err(|e| Error::io(path, e))? {
        "\n"
    } else {
        ""
    };
    writeln!(file, "{separator}{}", format_line(animal)).map_err(|e| Error::io(path, e))?;
    tracing::info!(path = %path.display(), name = animal.name(), "appended animal");
    Ok(())
}

/// Whether the file is non-empty and its last line has no terminating newline.
fn ends_mid_line(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

/// Loads every well-formed animal from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn load(path: &Path) -> Result<Loaded, Error> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let loaded = read_animals(BufReader::new(file)).map_err(|e| Error::io(path, e))?;
    tracing::info!(
        count = loaded.animals.len(),
        skipped = loaded.skipped.len(),
        path = %path.display(),
        "loaded animals"
    );
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tempfile::TempDir;
    use test_case::test_case;

    use super::*;

    #[test]
    fn format_line_writes_four_fields() {
        assert_eq!(format_line(&Animal::cat("Tom", 3, "grey")), "Cat,Tom,3,grey");
        assert_eq!(
            format_line(&Animal::dog("Rex", 12, "border collie")),
            "Dog,Rex,12,border collie"
        );
    }

    #[test]
    fn parse_line_trims_fields() {
        let animal = parse_line(" dog , Rex , 5 , beagle ").unwrap();
        assert_eq!(animal, Animal::dog("Rex", 5, "beagle"));
    }

    #[test]
    fn parse_line_accepts_legacy_kinds() {
        assert_eq!(
            parse_line("Gato,Mimi,2,preto").unwrap(),
            Animal::cat("Mimi", 2, "preto")
        );
        assert_eq!(
            parse_line("Cachorro,Bolt,4,vira-lata").unwrap(),
            Animal::dog("Bolt", 4, "vira-lata")
        );
    }

    #[test_case("Cat,Tom,3", 3; "too few fields")]
    #[test_case("Cat,Tom,3,grey,extra", 5; "too many fields")]
    #[test_case("Dog,Rex,5,golden, retriever", 5; "embedded comma")]
    fn parse_line_rejects_wrong_field_count(line: &str, found: usize) {
        assert_eq!(parse_line(line).unwrap_err(), LineError::FieldCount(found));
    }

    #[test_case("Cat,Tom,three,grey"; "word")]
    #[test_case("Cat,Tom,-1,grey"; "negative")]
    #[test_case("Cat,Tom,2.5,grey"; "fraction")]
    #[test_case("Cat,Tom,,grey"; "empty")]
    fn parse_line_rejects_invalid_age(line: &str) {
        assert!(matches!(
            parse_line(line).unwrap_err(),
            LineError::InvalidAge { .. }
        ));
    }

    #[test]
    fn parse_line_rejects_unknown_kind() {
        assert_eq!(
            parse_line("Fish,Nemo,1,orange").unwrap_err(),
            LineError::UnknownKind(UnknownKindError("Fish".to_string()))
        );
    }

    #[test]
    fn read_animals_skips_malformed_lines() {
        let input = "Cat,Tom,3,grey\n\
                     not a record\n\
                     \n\
                     Dog,Rex,old,beagle\n\
                     Dog,Buddy,4,labrador\n";

        let loaded = read_animals(Cursor::new(input)).unwrap();

        assert_eq!(
            loaded.animals,
            [
                Animal::cat("Tom", 3, "grey"),
                Animal::dog("Buddy", 4, "labrador")
            ]
        );
        let skipped: Vec<_> = loaded
            .skipped
            .iter()
            .map(|s| (s.line_number, s.content.as_str()))
            .collect();
        assert_eq!(skipped, [(2, "not a record"), (4, "Dog,Rex,old,beagle")]);
        assert_eq!(loaded.skipped[0].reason, LineError::FieldCount(1));
    }

    #[test]
    fn read_animals_skips_invalid_utf8_and_keeps_the_rest() {
        let input: &[u8] = b"Cat,Tom,3,grey\nDog,R\xffx,5,beagle\nDog,Buddy,4,labrador\n";

        let loaded = read_animals(Cursor::new(input)).unwrap();

        assert_eq!(
            loaded.animals,
            [
                Animal::cat("Tom", 3, "grey"),
                Animal::dog("Buddy", 4, "labrador")
            ]
        );
        assert_eq!(loaded.skipped.len(), 1);
        assert_eq!(loaded.skipped[0].line_number, 2);
        assert_eq!(loaded.skipped[0].content, "Dog,R\u{fffd}x,5,beagle");
        assert!(matches!(loaded.skipped[0].reason, LineError::Encoding(_)));
    }

    #[test]
    fn read_animals_handles_crlf_and_missing_final_newline() {
        let input = "Cat,Tom,3,grey\r\nDog,Rex,5,beagle";

        let loaded = read_animals(Cursor::new(input)).unwrap();

        assert_eq!(
            loaded.animals,
            [Animal::cat("Tom", 3, "grey"), Animal::dog("Rex", 5, "beagle")]
        );
        assert!(loaded.skipped.is_empty());
    }

    #[test]
    fn padded_animals_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("animals.csv");
        let animals = vec![
            Animal::cat(" Tom", 3, "grey "),
            Animal::dog("\tRex ", 5, " beagle\t"),
        ];

        save(&path, &animals).unwrap();

        assert_eq!(load(&path).unwrap().animals, animals);
    }

    #[test]
    fn append_creates_missing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("animals.csv");

        append(&path, &Animal::cat("Tom", 3, "grey")).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Cat,Tom,3,grey\n");
    }

    #[test]
    fn append_keeps_lines_that_fail_to_parse() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("animals.csv");
        std::fs::write(&path, "Cat,Tom,3,grey\nDog,Rex,five,beagle\n").unwrap();

        append(&path, &Animal::dog("Buddy", 4, "labrador")).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Cat,Tom,3,grey\nDog,Rex,five,beagle\nDog,Buddy,4,labrador\n"
        );
    }

    #[test]
    fn append_starts_a_new_line_after_unterminated_last_line() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("animals.csv");
        std::fs::write(&path, "Cat,Tom,3,grey").unwrap();

        append(&path, &Animal::dog("Rex", 5, "beagle")).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(
            loaded.animals,
            [Animal::cat("Tom", 3, "grey"), Animal::dog("Rex", 5, "beagle")]
        );
    }

    #[test]
    fn write_animals_terminates_every_line() {
        let mut buffer = Vec::new();
        let animals = [Animal::cat("Tom", 3, "grey"), Animal::dog("Rex", 5, "beagle")];

        write_animals(&mut buffer, &animals).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Cat,Tom,3,grey\nDog,Rex,5,beagle\n"
        );
    }

    #[test]
    fn save_overwrites_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("animals.csv");
        std::fs::write(&path, "Dog,Old,1,stale\nDog,Older,2,stale\n").unwrap();

        save(&path, &[Animal::cat("Tom", 3, "grey")]).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Cat,Tom,3,grey\n");
    }

    #[test]
    fn save_then_load_round_trips() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("animals.csv");
        let animals = vec![
            Animal::cat("Tom", 0, "grey"),
            Animal::dog("Rex", 5, "beagle"),
            Animal::cat("Tom", 14, "ginger"),
        ];

        save(&path, &animals).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded.animals, animals);
        assert!(loaded.skipped.is_empty());
    }

    #[test]
    fn load_missing_file_reports_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing.csv");

        let error = load(&path).unwrap_err();

        assert!(error.to_string().contains("missing.csv"));
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("no-such-dir").join("animals.csv");

        assert!(save(&path, &[]).is_err());
    }
}
