//! The roster and its tabular interchange format.
//!
//! # Format
//!
//! ```text
//! Ada Lovelace,WRITER
//! Grace Hopper,DP
//! "Hamilton, Margaret",EDITOR
//! Alan Turing
//! ```
//!
//! Two columns, no header. On read, blank lines are skipped, a missing or
//! unrecognised role becomes `CREW`, and rows whose name is blank are dropped.
//! Fields containing `,`, `"`, CR or LF are double-quoted on write, with
//! embedded quotes doubled.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::{Person, Role, RosterError};

/// An ordered list of people.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Roster {
    people: Vec<Person>,
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a person.
    pub fn push(&mut self, person: Person) {
        self.people.push(person);
    }

    /// Append every person from another roster, keeping order.
    pub fn extend(&mut self, other: Roster) {
        self.people.extend(other.people);
    }

    /// Remove the person at a 1-based position.
    pub fn remove(&mut self, position: usize) -> Result<Person, RosterError> {
        if position == 0 || position > self.people.len() {
            return Err(RosterError::IndexOutOfRange {
                index: position,
                len: self.people.len(),
            });
        }
        Ok(self.people.remove(position - 1))
    }

    /// Remove everyone.
    pub fn clear(&mut self) {
        self.people.clear();
    }

    /// Get the number of people.
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Borrow the people in roster order.
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// Iterate over people in roster order.
    pub fn iter(&self) -> std::slice::Iter<'_, Person> {
        self.people.iter()
    }

    /// Count people holding `role`.
    pub fn count(&self, role: Role) -> usize {
        self.people.iter().filter(|p| p.role() == role).count()
    }

    /// Head count per role, ordered by role declaration.
    pub fn role_counts(&self) -> BTreeMap<Role, usize> {
        let mut counts = BTreeMap::new();
        for person in &self.people {
            *counts.entry(person.role()).or_insert(0) += 1;
        }
        counts
    }

    /// Serialize to the two-column tabular format.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for person in &self.people {
            out.push_str(&quote_field(person.name()));
            out.push(',');
            out.push_str(&quote_field(person.role().as_str()));
            out.push('\n');
        }
        out
    }

    /// Parse from the two-column tabular format.
    pub fn parse(content: &str) -> Result<Self, RosterError> {
        let mut roster = Self::new();

        for fields in read_records(content)? {
            let name = fields.first().map(String::as_str).unwrap_or("");
            let role = fields.get(1).map(String::as_str).unwrap_or("");

            // Blank names can never be grouped
            if name.trim().is_empty() {
                continue;
            }

            roster.push(Person::from_raw(name, role)?);
        }

        Ok(roster)
    }

    /// Read from a file.
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, RosterError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Write to a file atomically.
    ///
    /// Uses write-to-temp + fsync + rename.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), RosterError> {
        let path = path.as_ref();
        let content = self.serialize();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = path.with_extension("tmp");

        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }

        fs::rename(&temp_path, path)?;

        Ok(())
    }
}

impl FromIterator<Person> for Roster {
    fn from_iter<I: IntoIterator<Item = Person>>(iter: I) -> Self {
        Self {
            people: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Person>> for Roster {
    fn from(people: Vec<Person>) -> Self {
        Self { people }
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Person;
    type IntoIter = std::slice::Iter<'a, Person>;

    fn into_iter(self) -> Self::IntoIter {
        self.people.iter()
    }
}

/// Quote a field if it holds a delimiter, quote, or line break.
fn quote_field(field: &str) -> String {
    if !field.contains([',', '"', '\r', '\n']) {
        return field.to_string();
    }

    let mut out = String::with_capacity(field.len() + 2);
    out.push('"');
    for c in field.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Split content into records of fields.
///
/// Blank lines produce no record. Quoted fields may span lines; a parse
/// error reports the line the record started on.
fn read_records(content: &str) -> Result<Vec<Vec<String>>, RosterError> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() && !quoted => {
                in_quotes = true;
                quoted = true;
            }
            ',' => {
                fields.push(std::mem::take(&mut field));
                quoted = false;
            }
            '\r' => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                if !is_blank_record(&fields, quoted) {
                    records.push(std::mem::take(&mut fields));
                }
                fields.clear();
                quoted = false;
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(RosterError::Parse {
            line: record_line,
            reason: "unterminated quoted field".to_string(),
        });
    }

    if !fields.is_empty() || !field.is_empty() || quoted {
        fields.push(field);
        if !is_blank_record(&fields, quoted) {
            records.push(fields);
        }
    }

    Ok(records)
}

fn is_blank_record(fields: &[String], quoted: bool) -> bool {
    !quoted && fields.len() == 1 && fields[0].is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str, role: Role) -> Person {
        Person::new(name, role).unwrap()
    }

    #[test]
    fn test_parse_basic() {
        let content = "Ada,WRITER\nGrace,DP\nAlan,GAFFER\n";
        let roster = Roster::parse(content).unwrap();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.people()[0], person("Ada", Role::Writer));
        assert_eq!(roster.people()[1], person("Grace", Role::Dp));
        assert_eq!(roster.people()[2], person("Alan", Role::Gaffer));
    }

    #[test]
    fn test_parse_normalizes_and_skips() {
        let content =
            "\nAda\n\n  Bo , \nCy,Boom Operator\n,WRITER\n   \r\nDi,writer\r\nEd, WRITER \r\n";
        let roster = Roster::parse(content).unwrap();
        let got: Vec<(&str, Role)> = roster.iter().map(|p| (p.name(), p.role())).collect();
        assert_eq!(
            got,
            vec![
                ("Ada", Role::Crew),
                ("Bo", Role::Crew),
                ("Cy", Role::Crew),
                ("Di", Role::Crew),
                ("Ed", Role::Writer),
            ]
        );
    }

    #[test]
    fn test_parse_quoted_fields() {
        let content = "\"Hamilton, Margaret\",EDITOR\n\"Say \"\"Hi\"\"\",DP\n\"Two\nLines\",GRIP";
        let roster = Roster::parse(content).unwrap();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster.people()[0].name(), "Hamilton, Margaret");
        assert_eq!(roster.people()[1].name(), "Say \"Hi\"");
        assert_eq!(roster.people()[2].name(), "Two\nLines");
        assert_eq!(roster.people()[2].role(), Role::Grip);
    }

    #[test]
    fn test_parse_unterminated_quote() {
        let content = "Ada,WRITER\n\"Broken,DP\n";
        let err = Roster::parse(content).unwrap_err();
        assert!(matches!(err, RosterError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_serialize_quotes_when_needed() {
        let roster: Roster = vec![
            person("Ada", Role::Writer),
            person("Hamilton, Margaret", Role::Editor),
            person("Say \"Hi\"", Role::Dp),
        ]
        .into();

        assert_eq!(
            roster.serialize(),
            "Ada,WRITER\n\"Hamilton, Margaret\",EDITOR\n\"Say \"\"Hi\"\"\",DP\n"
        );
        assert_eq!(Roster::parse(&roster.serialize()).unwrap(), roster);
    }

    #[test]
    fn test_remove_is_one_based() {
        let mut roster: Roster = vec![person("Ada", Role::Writer), person("Bo", Role::Dp)].into();

        assert!(matches!(
            roster.remove(0),
            Err(RosterError::IndexOutOfRange { index: 0, len: 2 })
        ));
        assert!(roster.remove(3).is_err());

        let removed = roster.remove(1).unwrap();
        assert_eq!(removed.name(), "Ada");
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.people()[0].name(), "Bo");
    }

    #[test]
    fn test_role_counts() {
        let roster: Roster = vec![
            person("Ada", Role::Writer),
            person("Bo", Role::Dp),
            person("Cy", Role::Writer),
        ]
        .into();

        assert_eq!(roster.count(Role::Writer), 2);
        assert_eq!(roster.count(Role::Grip), 0);

        let counts = roster.role_counts();
        assert_eq!(counts.get(&Role::Writer), Some(&2));
        assert_eq!(counts.get(&Role::Dp), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("crew.csv");

        let roster: Roster = vec![person("Ada", Role::Writer), person("Bo", Role::Crew)].into();
        roster.write_to_file(&path).unwrap();

        let loaded = Roster::read_from_file(&path).unwrap();
        assert_eq!(loaded, roster);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Roster::read_from_file(dir.path().join("missing.csv")).unwrap_err();
        assert!(err.is_io());
    }
}
