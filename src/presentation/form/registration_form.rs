use std::collections::BTreeMap;

use tracing::error;

use crate::presentation::{
    form::submitter::RegistrationSubmitter,
    handlers::registration_handler::RegisterRequest,
};

pub const SUBMIT_SUCCEEDED: &str = "申し込みが完了しました。確認メールをご確認ください。";
pub const SUBMIT_REJECTED: &str = "申し込み処理中にエラーが発生しました。もう一度お試しください。";
pub const SUBMIT_ERRORED: &str = "申し込み処理中にエラーが発生しました。";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Company,
    Name,
    Position,
    Email,
    Phone,
    Challenge,
}

/// Toast shown after a submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Success(&'static str),
    Error(&'static str),
}

/// State of the registration form on the landing page
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub company: String,
    pub name: String,
    pub position: String,
    pub email: String,
    pub phone: String,
    pub challenge: String,
    errors: BTreeMap<FormField, &'static str>,
    submitting: bool,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update one field. Any error shown for that field is cleared.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Company => self.company = value,
            FormField::Name => self.name = value,
            FormField::Position => self.position = value,
            FormField::Email => self.email = value,
            FormField::Phone => self.phone = value,
            FormField::Challenge => self.challenge = value,
        }
        self.errors.remove(&field);
    }

    pub fn error(&self, field: FormField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn errors(&self) -> &BTreeMap<FormField, &'static str> {
        &self.errors
    }

    /// True while a submission is in flight; the submit control is disabled
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Check required fields and record per-field messages. Returns true when the form can be sent.
    pub fn validate(&mut self) -> bool {
        let mut errors = BTreeMap::new();

        if self.company.trim().is_empty() {
            errors.insert(FormField::Company, "会社名は必須です");
        }
        if self.name.trim().is_empty() {
            errors.insert(FormField::Name, "名前は必須です");
        }
        if self.position.trim().is_empty() {
            errors.insert(FormField::Position, "役職は必須です");
        }
        if self.email.trim().is_empty() {
            errors.insert(FormField::Email, "メールアドレスは必須です");
        }
        if !self.email.contains('@') {
            errors.insert(FormField::Email, "有効なメールアドレスを入力してください");
        }
        if self.phone.trim().is_empty() {
            errors.insert(FormField::Phone, "電話番号は必須です");
        }

        self.errors = errors;
        self.errors.is_empty()
    }

    pub fn to_request(&self) -> RegisterRequest {
        let challenge = (!self.challenge.trim().is_empty()).then(|| self.challenge.clone());
        RegisterRequest {
            company: self.company.clone(),
            name: self.name.clone(),
            position: self.position.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            challenge,
        }
    }

    /// Validate and send the form.
    ///
    /// Returns `None` when validation blocked the submission.
    /// On success the fields are cleared; on any failure they are left as entered.
    pub async fn submit<S: RegistrationSubmitter + ?Sized>(&mut self, submitter: &S) -> Option<Notification> {
        if !self.validate() {
            return None;
        }

        let request = self.to_request();
        let outcome = {
            // reset even when this future is dropped mid-flight
            let _submitting = SubmittingGuard::raise(&mut self.submitting);
            submitter.submit(&request).await
        };

        let notification = match outcome {
            Ok(response) if response.success => {
                self.clear();
                Notification::Success(SUBMIT_SUCCEEDED)
            }
            Ok(_) => Notification::Error(SUBMIT_REJECTED),
            Err(e) => {
                error!("Submission error: {e}");
                Notification::Error(SUBMIT_ERRORED)
            }
        };
        Some(notification)
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Holds the submitting flag up until dropped
struct SubmittingGuard<'a>(&'a mut bool);

impl<'a> SubmittingGuard<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::Router;
    use rstest::*;
    use tokio::net::TcpListener;

    use super::*;
    use crate::{
        domain::{
            error::RepositoryError,
            models::{
                registration::{NewRegistration, Registration, RegistrationId},
                seminar::SEMINAR,
            },
            repositories::registration_repository::RegistrationRepository,
            services::email_service::{EmailMessage, EmailSender},
        },
        presentation::{
            form::submitter::{HttpRegistrationSubmitter, SubmitError},
            handlers::registration_handler::{RegistrationResponse, create_seminar_router},
        },
        usecase::submit_registration_usecase::SubmitRegistrationUsecase,
    };

    enum Reply {
        Success,
        Failure,
        Transport,
        Pending,
    }

    struct MockSubmitter {
        reply: Reply,
        requests: Mutex<Vec<RegisterRequest>>,
    }

    impl MockSubmitter {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RegistrationSubmitter for MockSubmitter {
        async fn submit(&self, request: &RegisterRequest) -> Result<RegistrationResponse, SubmitError> {
            self.requests.lock().unwrap().push(request.clone());
            match self.reply {
                Reply::Success => Ok(RegistrationResponse {
                    success: true,
                    message: "Registration completed".to_string(),
                }),
                Reply::Failure => Ok(RegistrationResponse {
                    success: false,
                    message: "Registration failed".to_string(),
                }),
                Reply::Transport => Err(SubmitError::Transport("connection refused".to_string())),
                Reply::Pending => std::future::pending().await,
            }
        }
    }

    #[fixture]
    fn filled_form() -> RegistrationForm {
        let mut form = RegistrationForm::new();
        form.set(FormField::Company, "テスト機械株式会社");
        form.set(FormField::Name, "山田太郎");
        form.set(FormField::Position, "営業部長");
        form.set(FormField::Email, "test@example.com");
        form.set(FormField::Phone, "090-1234-5678");
        form.set(FormField::Challenge, "見積作成に時間がかかる");
        form
    }

    #[test]
    fn test_validate_empty_form_negative() {
        let mut form = RegistrationForm::new();

        assert!(!form.validate());
        assert_eq!(form.error(FormField::Company), Some("会社名は必須です"));
        assert_eq!(form.error(FormField::Name), Some("名前は必須です"));
        assert_eq!(form.error(FormField::Position), Some("役職は必須です"));
        // the "@" check runs after the presence check and replaces its message
        assert_eq!(form.error(FormField::Email), Some("有効なメールアドレスを入力してください"));
        assert_eq!(form.error(FormField::Phone), Some("電話番号は必須です"));
        assert_eq!(form.error(FormField::Challenge), None);
    }

    #[rstest]
    fn test_validate_whitespace_only_negative(mut filled_form: RegistrationForm) {
        filled_form.set(FormField::Name, "   ");

        assert!(!filled_form.validate());
        assert_eq!(filled_form.errors().len(), 1);
        assert_eq!(filled_form.error(FormField::Name), Some("名前は必須です"));
    }

    #[rstest]
    fn test_validate_email_without_at_negative(mut filled_form: RegistrationForm) {
        filled_form.set(FormField::Email, "test.example.com");

        assert!(!filled_form.validate());
        assert_eq!(
            filled_form.error(FormField::Email),
            Some("有効なメールアドレスを入力してください")
        );
    }

    #[rstest]
    fn test_editing_field_clears_its_error(mut filled_form: RegistrationForm) {
        filled_form.set(FormField::Phone, "");
        filled_form.validate();
        assert!(filled_form.error(FormField::Phone).is_some());

        filled_form.set(FormField::Phone, "03-0000-0000");

        assert_eq!(filled_form.error(FormField::Phone), None);
    }

    #[rstest]
    fn test_to_request_omits_blank_challenge(mut filled_form: RegistrationForm) {
        filled_form.set(FormField::Challenge, "  ");

        assert_eq!(filled_form.to_request().challenge, None);
    }

    #[rstest]
    #[tokio::test]
    async fn test_submit_success_clears_form(mut filled_form: RegistrationForm) {
        let submitter = MockSubmitter::new(Reply::Success);

        let notification = filled_form.submit(&submitter).await;

        assert_eq!(notification, Some(Notification::Success(SUBMIT_SUCCEEDED)));
        assert!(filled_form.company.is_empty());
        assert!(filled_form.challenge.is_empty());
        assert!(!filled_form.is_submitting());

        let requests = submitter.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].company, "テスト機械株式会社");
        assert_eq!(requests[0].challenge.as_deref(), Some("見積作成に時間がかかる"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_submit_failure_keeps_fields(mut filled_form: RegistrationForm) {
        let submitter = MockSubmitter::new(Reply::Failure);

        let notification = filled_form.submit(&submitter).await;

        assert_eq!(notification, Some(Notification::Error(SUBMIT_REJECTED)));
        assert_eq!(filled_form.company, "テスト機械株式会社");
        assert!(!filled_form.is_submitting());
    }

    #[rstest]
    #[tokio::test]
    async fn test_submit_transport_error_keeps_fields(mut filled_form: RegistrationForm) {
        let submitter = MockSubmitter::new(Reply::Transport);

        let notification = filled_form.submit(&submitter).await;

        assert_eq!(notification, Some(Notification::Error(SUBMIT_ERRORED)));
        assert_eq!(filled_form.email, "test@example.com");
        assert!(!filled_form.is_submitting());
    }

    #[rstest]
    #[tokio::test]
    async fn test_cancelled_submit_does_not_lock_form(mut filled_form: RegistrationForm) {
        let hanging = MockSubmitter::new(Reply::Pending);

        // the pending submit is polled once, then dropped
        tokio::select! {
            biased;
            _ = filled_form.submit(&hanging) => panic!("pending submit completed"),
            _ = std::future::ready(()) => {}
        }

        assert!(!filled_form.is_submitting());
        assert_eq!(hanging.requests.lock().unwrap().len(), 1);

        let submitter = MockSubmitter::new(Reply::Success);
        let notification = filled_form.submit(&submitter).await;

        assert_eq!(notification, Some(Notification::Success(SUBMIT_SUCCEEDED)));
        assert_eq!(submitter.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_invalid_form_is_blocked() {
        let mut form = RegistrationForm::new();
        let submitter = MockSubmitter::new(Reply::Success);

        assert_eq!(form.submit(&submitter).await, None);
        assert!(submitter.requests.lock().unwrap().is_empty());
        assert!(!form.errors().is_empty());
    }

    // end-to-end: form -> HTTP -> router -> usecase, with store and email mocked

    #[derive(Clone, Default)]
    struct RecordingRepository {
        created: Arc<Mutex<Vec<NewRegistration>>>,
    }

    #[async_trait]
    impl RegistrationRepository for RecordingRepository {
        async fn create(&self, record: NewRegistration) -> Result<RegistrationId, RepositoryError> {
            self.created.lock().unwrap().push(record);
            Ok(1)
        }

        async fn list_all(&self) -> Vec<Registration> {
            Vec::new()
        }
    }

    #[derive(Clone, Default)]
    struct CountingEmailSender {
        sent: Arc<Mutex<usize>>,
    }

    #[async_trait]
    impl EmailSender for CountingEmailSender {
        async fn send(&self, _message: &EmailMessage) -> bool {
            *self.sent.lock().unwrap() += 1;
            true
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_submit_over_http_positive(mut filled_form: RegistrationForm) {
        let repository = RecordingRepository::default();
        let sender = CountingEmailSender::default();
        let usecase = SubmitRegistrationUsecase::new(
            repository.clone(),
            sender.clone(),
            "info@anyenv-inc.com".to_string(),
            SEMINAR,
        );
        let app = Router::new().nest("/api", create_seminar_router(usecase));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        let submitter = HttpRegistrationSubmitter::new(&format!("http://{addr}/"));

        let notification = filled_form.submit(&submitter).await;

        assert_eq!(notification, Some(Notification::Success(SUBMIT_SUCCEEDED)));
        assert_eq!(
            *repository.created.lock().unwrap(),
            vec![NewRegistration {
                company_name: "テスト機械株式会社".to_string(),
                name: "山田太郎".to_string(),
                position: "営業部長".to_string(),
                email: "test@example.com".to_string(),
                phone: "090-1234-5678".to_string(),
                challenge: Some("見積作成に時間がかかる".to_string()),
            }]
        );
        assert_eq!(*sender.sent.lock().unwrap(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn test_submit_over_http_unreachable_negative(mut filled_form: RegistrationForm) {
        let submitter = HttpRegistrationSubmitter::new("http://127.0.0.1:9");

        let notification = filled_form.submit(&submitter).await;

        assert_eq!(notification, Some(Notification::Error(SUBMIT_ERRORED)));
        assert_eq!(filled_form.name, "山田太郎");
    }
}
