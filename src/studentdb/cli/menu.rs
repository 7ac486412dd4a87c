//! Interactive numbered menu over a `StudentApi`.
//!
//! Input and output are generic so the loop can be driven from a script in
//! tests. End of input behaves like choosing Exit.

use super::render::{write_messages, write_students};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use studentdb::api::{CmdMessage, StudentApi};
use studentdb::error::Result;
use studentdb::model::{Field, FieldUpdate, SearchField, SearchQuery, StudentId, StudentInput};
use studentdb::store::DataStore;

enum Flow {
    Continue,
    Exit,
}

pub struct Menu<'a, S: DataStore, R, W> {
    api: &'a mut StudentApi<S>,
    input: R,
    output: W,
    import_path: PathBuf,
}

impl<'a, S: DataStore, R: BufRead, W: Write> Menu<'a, S, R, W> {
    pub fn new(api: &'a mut StudentApi<S>, input: R, output: W, import_path: PathBuf) -> Self {
        Self {
            api,
            input,
            output,
            import_path,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Enter the number of your choice: ")? else {
                return Ok(());
            };

            let outcome = match choice.as_str() {
                "1" => self.display_all(),
                "2" => self.add_student(),
                "3" => self.update_student(),
                "4" => self.delete_student(),
                "5" => self.search_students(),
                "6" => self.import_students(),
                "7" => {
                    writeln!(self.output, "Exiting the program.")?;
                    return Ok(());
                }
                _ => {
                    writeln!(
                        self.output,
                        "Invalid choice. Please enter a number between 1 and 7."
                    )?;
                    Ok(Flow::Continue)
                }
            };

            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(e) if e.is_recoverable() => {
                    let message = CmdMessage::error(format!("Error: {}", e));
                    write_messages(&mut self.output, &[message])?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "--- Student Management System ---")?;
        writeln!(self.output, "1. Display all students")?;
        writeln!(self.output, "2. Add a new student")?;
        writeln!(self.output, "3. Update a student")?;
        writeln!(self.output, "4. Delete a student")?;
        writeln!(self.output, "5. Search students")?;
        writeln!(self.output, "6. Import students from CSV")?;
        writeln!(self.output, "7. Exit")?;
        Ok(())
    }

    /// Reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Re-prompts until `accept` holds, printing the field rule on each miss.
    fn prompt_valid(
        &mut self,
        label: &str,
        accept: impl Fn(&str) -> std::result::Result<(), String>,
    ) -> Result<Option<String>> {
        loop {
            let Some(value) = self.prompt(label)? else {
                return Ok(None);
            };
            match accept(&value) {
                Ok(()) => return Ok(Some(value)),
                Err(message) => writeln!(self.output, "{}", message)?,
            }
        }
    }

    fn prompt_field(&mut self, field: Field) -> Result<Option<String>> {
        let label = format!("Enter {}: ", field.label());
        self.prompt_valid(&label, |value| {
            FieldUpdate::parse(field, value)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
    }

    fn prompt_id(&mut self, label: &str) -> Result<Option<StudentId>> {
        let raw = self.prompt_valid(label, |value| {
            value
                .parse::<StudentId>()
                .map(|_| ())
                .map_err(|e| e.to_string())
        })?;
        Ok(raw.and_then(|raw| raw.parse().ok()))
    }

    /// Shows a 1-based list and reads a choice from it.
    fn prompt_choice<T: Copy>(&mut self, options: &[(T, &str)]) -> Result<Option<Option<T>>> {
        for (i, (_, label)) in options.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, label)?;
        }
        let Some(raw) = self.prompt("Enter the number of your choice: ")? else {
            return Ok(None);
        };
        let picked = raw
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| options.get(i))
            .map(|(value, _)| *value);
        if picked.is_none() {
            writeln!(
                self.output,
                "Invalid choice. Please enter a number between 1 and {}.",
                options.len()
            )?;
        }
        Ok(Some(picked))
    }

    fn display_all(&mut self) -> Result<Flow> {
        let result = self.api.list_students()?;
        write_students(&mut self.output, &result.listed_students)?;
        write_messages(&mut self.output, &result.messages)?;
        Ok(Flow::Continue)
    }

    fn add_student(&mut self) -> Result<Flow> {
        let mut values = Vec::with_capacity(Field::ALL.len());
        for field in Field::ALL {
            let value = if field == Field::FacultyAdvisor {
                self.prompt("Enter Faculty Advisor (optional): ")?
            } else {
                self.prompt_field(field)?
            };
            let Some(value) = value else {
                return Ok(Flow::Exit);
            };
            values.push(value);
        }

        let mut values = values.into_iter();
        let mut next = || values.next().unwrap_or_default();
        let input = StudentInput {
            first_name: next(),
            last_name: next(),
            gpa: next(),
            major: next(),
            faculty_advisor: Some(next()),
            address: next(),
            city: next(),
            state: next(),
            zip_code: next(),
            mobile_phone_number: next(),
        };

        let result = self.api.add_student(&input)?;
        write_messages(&mut self.output, &result.messages)?;
        Ok(Flow::Continue)
    }

    fn update_student(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt_id("Enter the student ID to update: ")? else {
            return Ok(Flow::Exit);
        };
        let current = self.api.get_student(id)?;
        if current.is_not_found() {
            write_messages(&mut self.output, &current.messages)?;
            return Ok(Flow::Continue);
        }

        writeln!(self.output, "Select the attribute to update:")?;
        let options: Vec<_> = Field::ALL.iter().map(|f| (*f, f.label())).collect();
        let field = match self.prompt_choice(&options)? {
            None => return Ok(Flow::Exit),
            Some(None) => return Ok(Flow::Continue),
            Some(Some(field)) => field,
        };

        let value = if field == Field::FacultyAdvisor {
            self.prompt("Enter new Faculty Advisor (blank to clear): ")?
        } else {
            let label = format!("Enter new {}: ", field.label());
            self.prompt_valid(&label, |value| {
                FieldUpdate::parse(field, value)
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            })?
        };
        let Some(value) = value else {
            return Ok(Flow::Exit);
        };

        let result = self.api.update_student(id, field, &value)?;
        write_messages(&mut self.output, &result.messages)?;
        Ok(Flow::Continue)
    }

    fn delete_student(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt_id("Enter the student ID to delete: ")? else {
            return Ok(Flow::Exit);
        };
        let result = self.api.delete_student(id)?;
        write_messages(&mut self.output, &result.messages)?;
        Ok(Flow::Continue)
    }

    fn search_students(&mut self) -> Result<Flow> {
        writeln!(self.output, "Search by:")?;
        let options: Vec<_> = SearchField::ALL.iter().map(|f| (*f, f.label())).collect();
        let field = match self.prompt_choice(&options)? {
            None => return Ok(Flow::Exit),
            Some(None) => return Ok(Flow::Continue),
            Some(Some(field)) => field,
        };

        let label = format!("Enter the {} to search for: ", field.label());
        let Some(query) = self.prompt_valid(&label, |value| {
            SearchQuery::parse(field, value)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })?
        else {
            return Ok(Flow::Exit);
        };

        let result = self.api.search_students(field, &query)?;
        write_students(&mut self.output, &result.listed_students)?;
        write_messages(&mut self.output, &result.messages)?;
        Ok(Flow::Continue)
    }

    fn import_students(&mut self) -> Result<Flow> {
        let path = self.import_path.clone();
        let result = self.api.import_students(&path)?;
        write_messages(&mut self.output, &result.messages)?;
        Ok(Flow::Continue)
    }
}
