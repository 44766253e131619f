//! SeaORM implementation of PaymentRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::money::to_money;
use crate::domain::{DomainError, NewPayment, Payment, PaymentRepository};
use crate::models::payment::{self, ActiveModel, Entity as PaymentEntity};

/// SeaORM-based implementation of PaymentRepository
#[derive(Debug, Default, Clone, Copy)]
pub struct SeaOrmPaymentRepository;

impl SeaOrmPaymentRepository {
    pub fn new() -> Self {
        Self
    }
}

fn to_domain(model: payment::Model) -> Payment {
    Payment {
        id: model.payment_id,
        student_id: model.student_id,
        amount: to_money(model.amount),
        payment_date: model.payment_date,
        payment_type: model.payment_type,
    }
}

#[async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn save<C>(&self, db: &C, payment: NewPayment) -> Result<Payment, DomainError>
    where
        C: ConnectionTrait,
    {
        let model = ActiveModel {
            student_id: Set(payment.student_id),
            amount: Set(payment.amount),
            payment_date: Set(chrono::Utc::now().to_rfc3339()),
            payment_type: Set(payment.payment_type),
            ..Default::default()
        };

        let saved = model.insert(db).await?;
        Ok(to_domain(saved))
    }

    async fn find_by_id<C>(&self, db: &C, id: i32) -> Result<Option<Payment>, DomainError>
    where
        C: ConnectionTrait,
    {
        let payment = PaymentEntity::find_by_id(id).one(db).await?;
        Ok(payment.map(to_domain))
    }

    async fn find_all<C>(&self, db: &C) -> Result<Vec<Payment>, DomainError>
    where
        C: ConnectionTrait,
    {
        let payments = PaymentEntity::find()
            .order_by_asc(payment::Column::PaymentId)
            .all(db)
            .await?;

        Ok(payments.into_iter().map(to_domain).collect())
    }

    async fn find_by_student<C>(
        &self,
        db: &C,
        student_id: i32,
    ) -> Result<Vec<Payment>, DomainError>
    where
        C: ConnectionTrait,
    {
        let payments = PaymentEntity::find()
            .filter(payment::Column::StudentId.eq(student_id))
            .order_by_asc(payment::Column::PaymentId)
            .all(db)
            .await?;

        Ok(payments.into_iter().map(to_domain).collect())
    }

    async fn update<C>(&self, db: &C, payment: &Payment) -> Result<(), DomainError>
    where
        C: ConnectionTrait,
    {
        let changes = ActiveModel {
            student_id: Set(payment.student_id),
            amount: Set(payment.amount),
            payment_date: Set(payment.payment_date.clone()),
            payment_type: Set(payment.payment_type),
            ..Default::default()
        };

        let result = PaymentEntity::update_many()
            .set(changes)
            .filter(payment::Column::PaymentId.eq(payment.id))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Payment", payment.id));
        }

        Ok(())
    }

    async fn delete<C>(&self, db: &C, id: i32) -> Result<(), DomainError>
    where
        C: ConnectionTrait,
    {
        let result = PaymentEntity::delete_by_id(id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Payment", id));
        }

        Ok(())
    }
}
