use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use student_management::db;
use student_management::domain::{
    DomainError, NewCourse, NewPayment, NewStudent, Payment, PaymentRepository,
    UpdateStudentInput,
};
use student_management::infrastructure::{
    AppServices, SeaOrmPaymentRepository, SeaOrmStudentRepository,
};
use student_management::models::payment::PaymentType;
use student_management::models::student::EnrollmentStatus;
use student_management::services::PaymentService;

// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    // In-memory SQLite for testing
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

async fn setup_services() -> AppServices {
    AppServices::new(setup_test_db().await)
}

async fn add_student(services: &AppServices, name: &str, email: &str) -> i32 {
    services
        .students
        .add_student(NewStudent::new(name, Some(email.to_string()), None))
        .await
        .expect("Failed to add student")
        .id
}

/// Payment repository whose inserts always fail
struct FailingPaymentRepository;

#[async_trait]
impl PaymentRepository for FailingPaymentRepository {
    async fn save<C>(&self, _db: &C, _payment: NewPayment) -> Result<Payment, DomainError>
    where
        C: ConnectionTrait,
    {
        Err(DomainError::Database("payments table unavailable".to_string()))
    }

    async fn find_by_id<C>(&self, _db: &C, _id: i32) -> Result<Option<Payment>, DomainError>
    where
        C: ConnectionTrait,
    {
        Ok(None)
    }

    async fn find_all<C>(&self, _db: &C) -> Result<Vec<Payment>, DomainError>
    where
        C: ConnectionTrait,
    {
        Ok(Vec::new())
    }

    async fn find_by_student<C>(
        &self,
        _db: &C,
        _student_id: i32,
    ) -> Result<Vec<Payment>, DomainError>
    where
        C: ConnectionTrait,
    {
        Ok(Vec::new())
    }

    async fn update<C>(&self, _db: &C, payment: &Payment) -> Result<(), DomainError>
    where
        C: ConnectionTrait,
    {
        Err(DomainError::not_found("Payment", payment.id))
    }

    async fn delete<C>(&self, _db: &C, id: i32) -> Result<(), DomainError>
    where
        C: ConnectionTrait,
    {
        Err(DomainError::not_found("Payment", id))
    }
}

#[tokio::test]
async fn test_new_student_has_zero_balance_and_active_status() {
    let services = setup_services().await;

    for (name, email, phone) in [
        ("Ada Lovelace", "ada@example.com", "555-0100"),
        ("Alan Turing", "alan@example.com", "+44 20 7946"),
        ("Grace Hopper", "grace@example.com", ""),
    ] {
        let student = services
            .students
            .add_student(NewStudent::new(
                name,
                Some(email.to_string()),
                Some(phone.to_string()),
            ))
            .await
            .expect("Failed to add student");

        assert_eq!(student.balance, Decimal::ZERO);
        assert_eq!(student.enrollment_status, EnrollmentStatus::Active);
        assert!(student.course.is_none());
    }
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let services = setup_services().await;
    add_student(&services, "Ada", "ada@example.com").await;

    let err = services
        .students
        .add_student(NewStudent::new("Impostor", Some("ada@example.com".into()), None))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::ConstraintViolation(_)));
    let students = services.students.list_students().await.unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].name, "Ada");
}

#[tokio::test]
async fn test_update_to_taken_email_is_rejected() {
    let services = setup_services().await;
    add_student(&services, "Ada", "ada@example.com").await;
    let bob = add_student(&services, "Bob", "bob@example.com").await;

    let err = services
        .students
        .update_student(
            bob,
            UpdateStudentInput {
                email: Some(Some("ada@example.com".into())),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::ConstraintViolation(_)));
    let reloaded = services.students.get_student(bob).await.unwrap();
    assert_eq!(reloaded.email.as_deref(), Some("bob@example.com"));
}

#[tokio::test]
async fn test_payments_accumulate_one_record_per_call() {
    let services = setup_services().await;
    let id = add_student(&services, "Ada", "ada@example.com").await;

    services.payments.process_payment(id, dec!(100.00)).await.unwrap();
    services.payments.process_payment(id, dec!(50.25)).await.unwrap();

    let student = services.students.get_student(id).await.unwrap();
    assert_eq!(student.balance, dec!(150.25));

    let history = services.payments.payment_history(id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|p| p.payment_type == PaymentType::Payment));
    assert_eq!(history[0].amount, dec!(100.00));
    assert_eq!(history[1].amount, dec!(50.25));
}

#[tokio::test]
async fn test_payment_then_refund_example() {
    let services = setup_services().await;
    let id = add_student(&services, "Ada", "ada@example.com").await;

    let receipt = services.payments.process_payment(id, dec!(100.00)).await.unwrap();
    assert_eq!(receipt.new_balance, dec!(100.00));
    assert_eq!(receipt.payment.payment_type, PaymentType::Payment);
    assert_eq!(receipt.payment.amount, dec!(100.00));

    let receipt = services.payments.process_refund(id, dec!(40.00)).await.unwrap();
    assert_eq!(receipt.new_balance, dec!(60.00));

    assert_eq!(
        services.students.get_student(id).await.unwrap().balance,
        dec!(60.00)
    );

    let history = services.payments.payment_history(id).await.unwrap();
    let payments: Vec<_> = history
        .iter()
        .filter(|p| p.payment_type == PaymentType::Payment)
        .collect();
    let refunds: Vec<_> = history
        .iter()
        .filter(|p| p.payment_type == PaymentType::Refund)
        .collect();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].amount, dec!(100.00));
    assert_eq!(refunds.len(), 1);
    assert_eq!(refunds[0].amount, dec!(40.00));
}

#[tokio::test]
async fn test_failed_payment_insert_leaves_balance_unchanged() {
    let db = setup_test_db().await;
    let services = AppServices::new(db.clone());
    let id = add_student(&services, "Ada", "ada@example.com").await;
    services.payments.process_payment(id, dec!(20.00)).await.unwrap();

    let failing = PaymentService::new(
        db.clone(),
        SeaOrmStudentRepository::new(),
        FailingPaymentRepository,
    );
    let err = failing.process_payment(id, dec!(80.00)).await.unwrap_err();
    assert!(matches!(err, DomainError::Database(_)));

    assert_eq!(
        services.students.get_student(id).await.unwrap().balance,
        dec!(20.00)
    );
    assert_eq!(services.payments.payment_history(id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_store_failure_mid_payment_rolls_back() {
    let services = setup_services().await;
    let id = add_student(&services, "Ada", "ada@example.com").await;

    // The balance update succeeds; the payment insert then fails on the store.
    let db = services.db();
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "DROP TABLE payments".to_owned(),
    ))
    .await
    .expect("Failed to drop payments");

    let err = services
        .payments
        .process_payment(id, dec!(10.00))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Database(_)));
    assert_eq!(
        services.students.get_student(id).await.unwrap().balance,
        Decimal::ZERO
    );
}

#[tokio::test]
async fn test_refund_cannot_make_balance_negative() {
    let services = setup_services().await;
    let id = add_student(&services, "Ada", "ada@example.com").await;

    let err = services
        .payments
        .process_refund(id, dec!(0.01))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Validation(_)));
    assert!(services.payments.payment_history(id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_enroll_with_missing_course_keeps_reference() {
    let services = setup_services().await;
    let id = add_student(&services, "Ada", "ada@example.com").await;
    let course = services
        .courses
        .add_course(NewCourse::new("Mathematics", Some("3 years".into())))
        .await
        .unwrap();
    services.students.enroll_student(id, course.id).await.unwrap();

    let err = services
        .students
        .enroll_student(id, course.id + 100)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(
        services.students.get_student(id).await.unwrap().course,
        Some(course)
    );
}

#[tokio::test]
async fn test_enroll_missing_student_is_not_found() {
    let services = setup_services().await;
    let course = services
        .courses
        .add_course(NewCourse::new("Mathematics", None))
        .await
        .unwrap();

    let err = services
        .students
        .enroll_student(77, course.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity: "Student", id: 77 }));
}

#[tokio::test]
async fn test_deleting_course_clears_enrollment() {
    let services = setup_services().await;
    let id = add_student(&services, "Ada", "ada@example.com").await;
    let course = services
        .courses
        .add_course(NewCourse::new("Chemistry", None))
        .await
        .unwrap();
    services.students.enroll_student(id, course.id).await.unwrap();

    services.courses.delete_course(course.id).await.unwrap();

    let student = services.students.get_student(id).await.unwrap();
    assert!(student.course.is_none());
}

#[tokio::test]
async fn test_delete_student() {
    let services = setup_services().await;
    let id = add_student(&services, "Ada", "ada@example.com").await;

    services.students.delete_student(id).await.unwrap();
    assert!(services.students.get_student(id).await.unwrap_err().is_not_found());
    assert!(services.students.delete_student(id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_student_with_payments_cannot_be_deleted() {
    let services = setup_services().await;
    let id = add_student(&services, "Ada", "ada@example.com").await;
    services.payments.process_payment(id, dec!(5.00)).await.unwrap();

    let err = services.students.delete_student(id).await.unwrap_err();
    assert!(matches!(err, DomainError::ConstraintViolation(_)));
    assert!(services.students.get_student(id).await.is_ok());
}

#[tokio::test]
async fn test_payment_repository_sees_service_writes() {
    let db = setup_test_db().await;
    let services = AppServices::new(db.clone());
    let id = add_student(&services, "Ada", "ada@example.com").await;
    let receipt = services.payments.process_payment(id, dec!(9.99)).await.unwrap();

    let stored = SeaOrmPaymentRepository::new()
        .find_by_id(&db, receipt.payment.id)
        .await
        .unwrap()
        .expect("payment should be stored");
    assert_eq!(stored, receipt.payment);
}
