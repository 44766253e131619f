//! Payment Service - fee payments and refunds
//!
//! A payment or refund changes the student's balance and records a `payments`
//! row in one unit of work; if either write fails neither is kept.

use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DatabaseTransaction};
use serde::Serialize;

use super::unit_of_work::{begin, finish};
use crate::domain::money::MONEY_MAX;
use crate::domain::{
    Amount, DomainError, NewPayment, Payment, PaymentRepository, StudentRepository,
};
use crate::infrastructure::repositories::{SeaOrmPaymentRepository, SeaOrmStudentRepository};
use crate::models::payment::PaymentType;

/// Outcome of a payment or refund
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentReceipt {
    pub payment: Payment,
    pub new_balance: Decimal,
}

pub struct PaymentService<S = SeaOrmStudentRepository, P = SeaOrmPaymentRepository> {
    db: DatabaseConnection,
    students: S,
    payments: P,
}

impl<S, P> PaymentService<S, P>
where
    S: StudentRepository,
    P: PaymentRepository,
{
    pub fn new(db: DatabaseConnection, students: S, payments: P) -> Self {
        Self {
            db,
            students,
            payments,
        }
    }

    /// Adds `amount` to the student's balance and records a `payment`.
    pub async fn process_payment(
        &self,
        student_id: i32,
        amount: Decimal,
    ) -> Result<PaymentReceipt, DomainError> {
        let amount = Amount::new(amount)?;
        let txn = begin(&self.db).await?;
        let result = self
            .apply(&txn, student_id, amount, PaymentType::Payment)
            .await;
        finish(txn, result).await
    }

    /// Subtracts `amount` from the student's balance and records a `refund`.
    ///
    /// Refunds larger than the current balance are rejected.
    pub async fn process_refund(
        &self,
        student_id: i32,
        amount: Decimal,
    ) -> Result<PaymentReceipt, DomainError> {
        let amount = Amount::new(amount)?;
        let txn = begin(&self.db).await?;
        let result = self
            .apply(&txn, student_id, amount, PaymentType::Refund)
            .await;
        finish(txn, result).await
    }

    pub async fn payment_history(&self, student_id: i32) -> Result<Vec<Payment>, DomainError> {
        if self.students.find_by_id(&self.db, student_id).await?.is_none() {
            return Err(DomainError::not_found("Student", student_id));
        }
        self.payments.find_by_student(&self.db, student_id).await
    }

    async fn apply(
        &self,
        txn: &DatabaseTransaction,
        student_id: i32,
        amount: Amount,
        payment_type: PaymentType,
    ) -> Result<PaymentReceipt, DomainError> {
        let mut student = self
            .students
            .find_by_id(txn, student_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Student", student_id))?;

        let new_balance = match payment_type {
            PaymentType::Payment => student.balance + amount.value(),
            PaymentType::Refund => student.balance - amount.value(),
        };

        if new_balance < Decimal::ZERO {
            return Err(DomainError::Validation(format!(
                "Refund of {} exceeds balance of {}",
                amount.value(),
                student.balance
            )));
        }
        if new_balance > MONEY_MAX {
            return Err(DomainError::Validation(format!(
                "Balance would exceed the maximum of {}",
                MONEY_MAX
            )));
        }

        student.balance = new_balance;
        self.students.update(txn, &student).await?;

        let payment = self
            .payments
            .save(
                txn,
                NewPayment {
                    student_id,
                    amount: amount.value(),
                    payment_type,
                },
            )
            .await?;

        tracing::info!(
            "Recorded {} of {} for student #{}, balance now {}",
            payment_type,
            amount.value(),
            student_id,
            new_balance
        );

        Ok(PaymentReceipt {
            payment,
            new_balance,
        })
    }
}
