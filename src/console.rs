//! Numbered console menu over the application services
//!
//! Input and output are generic so the menu can be driven by stdin/stdout or
//! by a script in tests. Failed operations are reported and the menu returns;
//! end of input exits like choosing `0`.

use rust_decimal::Decimal;
use std::io;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

use crate::domain::{DomainError, NewCourse, NewStudent, UpdateStudentInput};
use crate::infrastructure::AppServices;
use crate::models::student::EnrollmentStatus;

const MENU: &str = "\
=== Student Management ===
1. Add student
2. View students
3. Update student
4. Delete student
5. Enroll student in course
6. Process payment
7. Process refund
8. Add course
9. List courses
10. Payment history
11. Set enrollment status
0. Exit";

#[derive(Debug, Error)]
enum ConsoleError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("end of input")]
    Eof,
}

struct Session<'a, R, W> {
    services: &'a AppServices,
    lines: Lines<R>,
    output: W,
}

/// Runs the menu until `0` is chosen or input ends.
pub async fn run<R, W>(services: &AppServices, input: R, output: W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut session = Session {
        services,
        lines: input.lines(),
        output,
    };

    loop {
        session.say(MENU).await?;
        let choice = match session.prompt("Enter choice: ").await {
            Ok(choice) => choice,
            Err(ConsoleError::Eof) => break,
            Err(ConsoleError::Io(e)) => return Err(e),
            Err(e) => {
                session.say(&format!("Error: {}", e)).await?;
                continue;
            }
        };

        let outcome = match choice.as_str() {
            "0" => {
                session.say("Goodbye!").await?;
                break;
            }
            "1" => session.add_student().await,
            "2" => session.view_students().await,
            "3" => session.update_student().await,
            "4" => session.delete_student().await,
            "5" => session.enroll_student().await,
            "6" => session.process_payment().await,
            "7" => session.process_refund().await,
            "8" => session.add_course().await,
            "9" => session.list_courses().await,
            "10" => session.payment_history().await,
            "11" => session.set_status().await,
            other => Err(ConsoleError::Input(format!("unknown choice '{}'", other))),
        };

        match outcome {
            Ok(()) => {}
            Err(ConsoleError::Eof) => break,
            Err(ConsoleError::Io(e)) => return Err(e),
            Err(e) => {
                tracing::debug!("Menu action failed: {}", e);
                session.say(&format!("Error: {}", e)).await?;
            }
        }
    }

    session.output.flush().await
}

impl<R, W> Session<'_, R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    async fn say(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await
    }

    async fn prompt(&mut self, label: &str) -> Result<String, ConsoleError> {
        self.output.write_all(label.as_bytes()).await?;
        self.output.flush().await?;
        match self.lines.next_line().await? {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(ConsoleError::Eof),
        }
    }

    async fn prompt_optional(&mut self, label: &str) -> Result<Option<String>, ConsoleError> {
        let value = self.prompt(label).await?;
        Ok(Some(value).filter(|v| !v.is_empty()))
    }

    /// Blank keeps the current value, `-` clears it.
    async fn prompt_change(&mut self, label: &str) -> Result<Option<Option<String>>, ConsoleError> {
        let value = self.prompt(label).await?;
        Ok(match value.as_str() {
            "" => None,
            "-" => Some(None),
            _ => Some(Some(value)),
        })
    }

    async fn prompt_id(&mut self, label: &str) -> Result<i32, ConsoleError> {
        let value = self.prompt(label).await?;
        value
            .parse()
            .map_err(|_| ConsoleError::Input(format!("'{}' is not a valid id", value)))
    }

    async fn prompt_amount(&mut self, label: &str) -> Result<Decimal, ConsoleError> {
        let value = self.prompt(label).await?;
        value
            .parse()
            .map_err(|_| ConsoleError::Input(format!("'{}' is not a valid amount", value)))
    }

    async fn add_student(&mut self) -> Result<(), ConsoleError> {
        let name = self.prompt("Name: ").await?;
        let email = self.prompt_optional("Email: ").await?;
        let phone = self.prompt_optional("Phone: ").await?;

        let student = self
            .services
            .students
            .add_student(NewStudent::new(name, email, phone))
            .await?;
        self.say(&format!("Student added: {}", student)).await?;
        Ok(())
    }

    async fn view_students(&mut self) -> Result<(), ConsoleError> {
        let students = self.services.students.list_students().await?;
        if students.is_empty() {
            self.say("No students found.").await?;
        }
        for student in students {
            self.say(&student.to_string()).await?;
        }
        Ok(())
    }

    async fn update_student(&mut self) -> Result<(), ConsoleError> {
        let id = self.prompt_id("Student ID: ").await?;
        let current = self.services.students.get_student(id).await?;
        self.say(&format!("Current: {}", current)).await?;

        let name = self.prompt_optional("New name (blank keeps): ").await?;
        let email = self
            .prompt_change("New email (blank keeps, - clears): ")
            .await?;
        let phone = self
            .prompt_change("New phone (blank keeps, - clears): ")
            .await?;

        let student = self
            .services
            .students
            .update_student(id, UpdateStudentInput { name, email, phone })
            .await?;
        self.say(&format!("Student updated: {}", student)).await?;
        Ok(())
    }

    async fn delete_student(&mut self) -> Result<(), ConsoleError> {
        let id = self.prompt_id("Student ID: ").await?;
        self.services.students.delete_student(id).await?;
        self.say(&format!("Student #{} deleted.", id)).await?;
        Ok(())
    }

    async fn enroll_student(&mut self) -> Result<(), ConsoleError> {
        let student_id = self.prompt_id("Student ID: ").await?;
        let course_id = self.prompt_id("Course ID: ").await?;

        let student = self
            .services
            .students
            .enroll_student(student_id, course_id)
            .await?;
        self.say(&format!("Student enrolled: {}", student)).await?;
        Ok(())
    }

    async fn process_payment(&mut self) -> Result<(), ConsoleError> {
        let student_id = self.prompt_id("Student ID: ").await?;
        let amount = self.prompt_amount("Amount: ").await?;

        let receipt = self
            .services
            .payments
            .process_payment(student_id, amount)
            .await?;
        self.say(&format!(
            "Payment recorded: {}. New balance: {}",
            receipt.payment, receipt.new_balance
        ))
        .await?;
        Ok(())
    }

    async fn process_refund(&mut self) -> Result<(), ConsoleError> {
        let student_id = self.prompt_id("Student ID: ").await?;
        let amount = self.prompt_amount("Amount: ").await?;

        let receipt = self
            .services
            .payments
            .process_refund(student_id, amount)
            .await?;
        self.say(&format!(
            "Refund recorded: {}. New balance: {}",
            receipt.payment, receipt.new_balance
        ))
        .await?;
        Ok(())
    }

    async fn add_course(&mut self) -> Result<(), ConsoleError> {
        let name = self.prompt("Course name: ").await?;
        let duration = self.prompt_optional("Duration: ").await?;

        let course = self
            .services
            .courses
            .add_course(NewCourse::new(name, duration))
            .await?;
        self.say(&format!("Course added: {}", course)).await?;
        Ok(())
    }

    async fn list_courses(&mut self) -> Result<(), ConsoleError> {
        let courses = self.services.courses.list_courses().await?;
        if courses.is_empty() {
            self.say("No courses found.").await?;
        }
        for course in courses {
            self.say(&course.to_string()).await?;
        }
        Ok(())
    }

    async fn payment_history(&mut self) -> Result<(), ConsoleError> {
        let student_id = self.prompt_id("Student ID: ").await?;
        let payments = self.services.payments.payment_history(student_id).await?;
        if payments.is_empty() {
            self.say("No payments recorded.").await?;
        }
        for payment in payments {
            self.say(&payment.to_string()).await?;
        }
        Ok(())
    }

    async fn set_status(&mut self) -> Result<(), ConsoleError> {
        let student_id = self.prompt_id("Student ID: ").await?;
        let value = self.prompt("Status (ACTIVE/INACTIVE): ").await?;
        let status: EnrollmentStatus = value.parse().map_err(ConsoleError::Input)?;

        let student = self
            .services
            .students
            .set_enrollment_status(student_id, status)
            .await?;
        self.say(&format!("Status updated: {}", student)).await?;
        Ok(())
    }
}
