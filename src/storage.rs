// File processor: moves the roster between memory and a JSON file.
//
// The file is a JSON array of flat objects with `first_name`, `last_name`
// and `course_name`. `load_students`/`save_students` return typed errors;
// `FileProcessor` wraps them and reports failures through a `Reporter`
// so the menu loop never sees them.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::model::Student;
use crate::ui::Reporter;

pub const READ_FAILED: &str = "The file cannot be read correctly";
pub const WRITE_FAILED: &str = "There was an error writing to the file";

/// On-disk shape of one student.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub first_name: String,
    pub last_name: String,
    pub course_name: String,
}

impl From<&Student> for StudentRecord {
    // Names are persisted in their rendered (title-cased) form.
    fn from(student: &Student) -> Self {
        Self {
            first_name: student.first_name().to_string(),
            last_name: student.last_name().to_string(),
            course_name: student.course_name().to_string(),
        }
    }
}

/// Read every record in `path`. Either all rows become students or the
/// whole load fails.
pub fn load_students(path: &Path) -> Result<Vec<Student>, StorageError> {
    let file = File::open(path).map_err(|source| StorageError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let records: Vec<StudentRecord> =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| StorageError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            Student::new(&record.first_name, &record.last_name, &record.course_name).map_err(
                |source| StorageError::Record {
                    path: path.to_path_buf(),
                    index,
                    source,
                },
            )
        })
        .collect()
}

/// Overwrite `path` with `students`. Not atomic: a failure part way through
/// leaves whatever was written.
pub fn save_students(path: &Path, students: &[Student]) -> Result<(), StorageError> {
    let records: Vec<StudentRecord> = students.iter().map(StudentRecord::from).collect();

    let file = File::create(path).map_err(|source| StorageError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &records).map_err(|source| StorageError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(|source| StorageError::Flush {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Load/save entry points used by the menu loop.
///
/// Storage failures are reported, not returned. The `io::Result` only
/// carries failures of the reporter itself (the console).
pub struct FileProcessor;

impl FileProcessor {
    /// Append the students stored in `file_name` to `roster`. On failure the
    /// roster is left untouched and a single error is reported.
    pub fn read<R: Reporter + ?Sized>(
        file_name: &Path,
        roster: &mut Vec<Student>,
        reporter: &mut R,
    ) -> io::Result<()> {
        match load_students(file_name) {
            Ok(students) => {
                log::info!(
                    "loaded {} students from {}",
                    students.len(),
                    file_name.display()
                );
                roster.extend(students);
                Ok(())
            }
            Err(err) => {
                log::warn!("{err}");
                reporter.report_error(READ_FAILED, Some(&err))
            }
        }
    }

    /// Persist the whole roster to `file_name`, then show it.
    pub fn write<R: Reporter + ?Sized>(
        file_name: &Path,
        roster: &[Student],
        reporter: &mut R,
    ) -> io::Result<()> {
        match save_students(file_name, roster) {
            Ok(()) => {
                log::info!("saved {} students to {}", roster.len(), file_name.display());
                reporter.display_roster(roster)
            }
            Err(err) => {
                log::warn!("{err}");
                reporter.report_error(WRITE_FAILED, Some(&err))
            }
        }
    }
}
