use colored::*;
use serde_json::json;
use std::io::{self, Write};
use studentdb::api::{CmdMessage, CmdResult, MessageLevel};
use studentdb::model::Student;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ID_WIDTH: usize = 5;
const NAME_WIDTH: usize = 26;
const GPA_WIDTH: usize = 5;
const MAJOR_WIDTH: usize = 22;
const CITY_WIDTH: usize = 16;
const STATE_WIDTH: usize = 5;

pub fn write_messages<W: Write>(out: &mut W, messages: &[CmdMessage]) -> io::Result<()> {
    for message in messages {
        match message.level {
            MessageLevel::Info => writeln!(out, "{}", message.content.dimmed())?,
            MessageLevel::Success => writeln!(out, "{}", message.content.green())?,
            MessageLevel::Warning => writeln!(out, "{}", message.content.yellow())?,
            MessageLevel::Error => writeln!(out, "{}", message.content.red())?,
        }
    }
    Ok(())
}

/// One line per student, fixed-width columns.
pub fn write_students<W: Write>(out: &mut W, students: &[Student]) -> io::Result<()> {
    if students.is_empty() {
        return Ok(());
    }

    writeln!(
        out,
        "{}{}{}{}{}{}{}",
        cell("ID", ID_WIDTH),
        cell("Name", NAME_WIDTH),
        cell("GPA", GPA_WIDTH),
        cell("Major", MAJOR_WIDTH),
        cell("City", CITY_WIDTH),
        cell("State", STATE_WIDTH),
        "Phone"
    )?;

    for s in students {
        writeln!(
            out,
            "{}{}{}{}{}{}{}",
            cell(&s.id.to_string(), ID_WIDTH),
            cell(&s.full_name(), NAME_WIDTH),
            cell(&format!("{:.2}", s.gpa), GPA_WIDTH),
            cell(&s.major, MAJOR_WIDTH),
            cell(&s.city, CITY_WIDTH),
            cell(&s.state, STATE_WIDTH),
            s.mobile_phone_number
        )?;
    }
    Ok(())
}

/// Every column of one student.
pub fn write_student_detail<W: Write>(out: &mut W, s: &Student) -> io::Result<()> {
    writeln!(out, "{} {}", s.id.to_string().yellow(), s.full_name().bold())?;
    writeln!(out, "--------------------------------")?;
    writeln!(out, "GPA:             {}", s.gpa)?;
    writeln!(out, "Major:           {}", s.major)?;
    writeln!(
        out,
        "Faculty Advisor: {}",
        s.faculty_advisor.as_deref().unwrap_or("-")
    )?;
    writeln!(out, "Address:         {}", s.address)?;
    writeln!(out, "City:            {}", s.city)?;
    writeln!(out, "State:           {}", s.state)?;
    writeln!(out, "Zip Code:        {}", s.zip_code)?;
    writeln!(out, "Mobile Phone:    {}", s.mobile_phone_number)?;
    Ok(())
}

/// One JSON object per command: the students it read or wrote, the ids it
/// created or could not find, and its messages.
pub fn write_json<W: Write>(out: &mut W, result: &CmdResult) -> io::Result<()> {
    let students = if result.listed_students.is_empty() {
        &result.affected_students
    } else {
        &result.listed_students
    };
    let body = json!({
        "students": students,
        "created_ids": result.created_ids,
        "missing_ids": result.missing_ids,
        "messages": result.messages,
    });
    serde_json::to_writer_pretty(&mut *out, &body)?;
    writeln!(out)
}

/// Truncates to fit `width - 1` columns and pads, leaving one space gap.
fn cell(s: &str, width: usize) -> String {
    let text = truncate_to_width(s, width.saturating_sub(1));
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}
