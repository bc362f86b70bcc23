use std::{
    cmp::Ordering,
    ffi::{OsStr, OsString},
    fs::{self, DirEntry},
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListError {
    #[error("cannot read directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    Other,
    NotFound,
}

impl EntryKind {
    /// Classifies a directory entry with at most one extra `stat`, which is
    /// only needed when the entry is a symlink.
    fn probe(entry: &DirEntry) -> Self {
        match entry.file_type() {
            Ok(file_type) if file_type.is_symlink() => match fs::metadata(entry.path()) {
                Ok(metadata) => Self::from_metadata_type(metadata.file_type()),
                Err(error) if error.kind() == io::ErrorKind::NotFound => EntryKind::NotFound,
                Err(_) => EntryKind::Other,
            },
            Ok(file_type) => Self::from_metadata_type(file_type),
            Err(error) if error.kind() == io::ErrorKind::NotFound => EntryKind::NotFound,
            Err(_) => EntryKind::Other,
        }
    }

    fn from_metadata_type(file_type: fs::FileType) -> Self {
        if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: OsString,
    kind: EntryKind,
}

impl Entry {
    pub fn new(name: impl Into<OsString>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn name(&self) -> &OsStr {
        &self.name
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn label(&self) -> String {
        self.name.to_string_lossy().into_owned()
    }

    fn is_hidden(&self) -> bool {
        self.name.as_encoded_bytes().starts_with(b".")
    }
}

/// Extension allow-list built from `-f`. Each suffix carries its leading dot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    suffixes: Vec<String>,
}

impl FilterSet {
    pub fn from_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let suffixes = extensions
            .into_iter()
            .filter_map(|ext| {
                let ext = ext.as_ref().trim();
                (!ext.is_empty()).then(|| format!(".{ext}"))
            })
            .collect();
        Self { suffixes }
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// A suffix only matches when something precedes it in the name.
    pub fn matches(&self, name: &OsStr) -> bool {
        let name = name.as_encoded_bytes();
        self.suffixes.iter().any(|suffix| {
            let suffix = suffix.as_bytes();
            suffix.len() < name.len() && name.ends_with(suffix)
        })
    }
}

/// Lists `path` as directories first, then everything else, each group in
/// version order. `.` and `..` never appear.
pub fn list(
    path: &Path,
    show_hidden: bool,
    filter: Option<&FilterSet>,
) -> Result<Vec<Entry>, ListError> {
    let read_dir = fs::read_dir(path).map_err(|source| ListError::ReadDir {
        path: path.to_path_buf(),
        source,
    })?;

    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for dir_entry in read_dir {
        let dir_entry = match dir_entry {
            Ok(dir_entry) => dir_entry,
            Err(error) => {
                tracing::debug!(dir = %path.display(), %error, "skipping unreadable entry");
                continue;
            }
        };
        let entry = Entry::new(dir_entry.file_name(), EntryKind::probe(&dir_entry));

        if entry.name == "." || entry.name == ".." {
            continue;
        }
        if !show_hidden && entry.is_hidden() {
            continue;
        }

        if entry.is_dir() {
            dirs.push(entry);
        } else if filter.map_or(true, |set| set.is_empty() || set.matches(&entry.name)) {
            files.push(entry);
        }
    }

    let by_version =
        |a: &Entry, b: &Entry| version_cmp(a.name.as_encoded_bytes(), b.name.as_encoded_bytes());
    dirs.sort_by(by_version);
    files.sort_by(by_version);
    dirs.append(&mut files);
    Ok(dirs)
}

// States of the version comparison, offset by the class of the current byte
// (0 non-digit, 1 nonzero digit, 2 zero).
const NORMAL: usize = 0;
const INTEGRAL: usize = 3;
const FRACTIONAL: usize = 6;
const LEADING_ZERO: usize = 9;

#[derive(Clone, Copy)]
enum Verdict {
    Bytes,
    Length,
    Less,
    Greater,
}

#[rustfmt::skip]
const NEXT_STATE: [usize; 12] = [
    NORMAL, INTEGRAL, LEADING_ZERO,
    NORMAL, INTEGRAL, INTEGRAL,
    NORMAL, FRACTIONAL, FRACTIONAL,
    NORMAL, FRACTIONAL, LEADING_ZERO,
];

#[rustfmt::skip]
const VERDICT: [Verdict; 36] = {
    use Verdict::{Bytes as B, Greater as G, Length as L, Less as S};
    [
        B, B, B, B, L, B, B, B, B,
        B, S, S, G, L, L, G, L, L,
        B, B, B, B, B, B, B, B, B,
        B, G, G, S, B, B, S, B, B,
    ]
};

fn byte_class(byte: u8) -> usize {
    usize::from(byte == b'0') + usize::from(byte.is_ascii_digit())
}

/// Version ordering as `ls -v` sorts: digit runs compare by value, so
/// "file2" < "file10", and a run with leading zeros reads as a fraction, so
/// "img007" < "img6" and "a009" < "a01".
fn version_cmp(left: &[u8], right: &[u8]) -> Ordering {
    let at = |name: &[u8], i: usize| name.get(i).copied().unwrap_or(0);

    let mut i = 0;
    let mut a = at(left, i);
    let mut b = at(right, i);
    let mut state = NORMAL + byte_class(a);

    while a == b {
        if a == 0 {
            return Ordering::Equal;
        }
        state = NEXT_STATE[state];
        i += 1;
        a = at(left, i);
        b = at(right, i);
        state += byte_class(a);
    }

    match VERDICT[state * 3 + byte_class(b)] {
        Verdict::Bytes => a.cmp(&b),
        Verdict::Less => Ordering::Less,
        Verdict::Greater => Ordering::Greater,
        Verdict::Length => {
            let mut j = i + 1;
            while at(left, j).is_ascii_digit() {
                if !at(right, j).is_ascii_digit() {
                    return Ordering::Greater;
                }
                j += 1;
            }
            if at(right, j).is_ascii_digit() {
                Ordering::Less
            } else {
                a.cmp(&b)
            }
        }
    }
}
