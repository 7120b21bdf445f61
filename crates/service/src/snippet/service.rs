use std::sync::Arc;

use models::snippet::SnippetFields;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::auth::domain::AuthUser;
use crate::errors::{FieldErrors, ServiceError};
use crate::highlight::{self, RenderRequest};
use crate::pagination::{Page, Pagination};

use super::domain::{Snippet, SnippetInput};
use super::permissions::ensure_owner;
use super::repository::SnippetRepository;

/// Language and style applied when a request omits them.
#[derive(Debug, Clone)]
pub struct SnippetDefaults {
    pub language: String,
    pub style: String,
}

impl Default for SnippetDefaults {
    fn default() -> Self {
        Self { language: "python".into(), style: "InspiredGitHub".into() }
    }
}

fn invalid_choice(value: &str) -> String {
    format!("\"{value}\" is not a valid choice.")
}

/// Snippet CRUD with owner-or-read-only rules.
///
/// `highlighted` is rendered here on every save and never on reads.
pub struct SnippetService<R: SnippetRepository> {
    repo: Arc<R>,
    defaults: SnippetDefaults,
}

impl<R: SnippetRepository> SnippetService<R> {
    pub fn new(repo: Arc<R>, defaults: SnippetDefaults) -> Self { Self { repo, defaults } }

    pub async fn list(&self) -> Result<Vec<Snippet>, ServiceError> {
        self.repo.list().await
    }

    pub async fn page(&self, pagination: Pagination) -> Result<Page<Snippet>, ServiceError> {
        self.repo.page(pagination).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Snippet, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("snippet"))
    }

    /// Create a snippet owned by `user`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::domain::AuthUser;
    /// use service::snippet::{SnippetInput, SnippetService, SnippetDefaults, repository::mock::MockSnippetRepository};
    /// let repo = Arc::new(MockSnippetRepository::default());
    /// let user = AuthUser { id: uuid::Uuid::new_v4(), username: "alice".into() };
    /// repo.add_owner(user.id, &user.username);
    /// let svc = SnippetService::new(repo, SnippetDefaults::default());
    /// let input = SnippetInput { code: "print('hi')".into(), ..Default::default() };
    /// let s = tokio_test::block_on(svc.create(&user, input)).unwrap();
    /// assert_eq!(s.owner, "alice");
    /// assert_eq!(s.language, "python");
    /// assert!(s.highlighted.contains("<pre"));
    /// ```
    #[instrument(skip(self, input), fields(user_id = %user.id))]
    pub async fn create(&self, user: &AuthUser, input: SnippetInput) -> Result<Snippet, ServiceError> {
        let fields = self.prepare(input)?;
        let created = self.repo.create(user.id, fields).await?;
        info!(snippet_id = %created.id, language = %created.language, "snippet_created");
        Ok(created)
    }

    /// Full replacement of the writable fields. Missing snippet wins over
    /// permission, permission wins over validation.
    #[instrument(skip(self, input), fields(user_id = %user.id, snippet_id = %id))]
    pub async fn update(&self, user: &AuthUser, id: Uuid, input: SnippetInput) -> Result<Snippet, ServiceError> {
        let existing = self.get(id).await?;
        ensure_owner(user, &existing)?;
        let fields = self.prepare(input)?;
        let updated = self
            .repo
            .update(id, fields)
            .await?
            .ok_or_else(|| ServiceError::not_found("snippet"))?;
        info!("snippet_updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(user_id = %user.id, snippet_id = %id))]
    pub async fn delete(&self, user: &AuthUser, id: Uuid) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        ensure_owner(user, &existing)?;
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("snippet"));
        }
        info!("snippet_deleted");
        Ok(())
    }

    /// The stored highlighted document.
    pub async fn highlighted(&self, id: Uuid) -> Result<String, ServiceError> {
        Ok(self.get(id).await?.highlighted)
    }

    /// Validate, apply defaults and render the highlighted document.
    fn prepare(&self, input: SnippetInput) -> Result<SnippetFields, ServiceError> {
        let mut errs = match input.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(e),
        };

        let raw_language = input.language.unwrap_or_else(|| self.defaults.language.clone());
        let language = match highlight::normalize_language(&raw_language) {
            Some(language) => language,
            None => {
                errs.add("language", invalid_choice(&raw_language));
                raw_language
            }
        };

        let style = input.style.unwrap_or_else(|| self.defaults.style.clone());
        if !highlight::is_known_style(&style) {
            errs.add("style", invalid_choice(&style));
        }

        errs.into_result()?;

        let highlighted = highlight::render_document(&RenderRequest {
            title: &input.title,
            code: &input.code,
            language: &language,
            style: &style,
            linenos: input.linenos,
        })?;

        Ok(SnippetFields { title: input.title, code: input.code, linenos: input.linenos, language, style, highlighted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snippet::repository::mock::MockSnippetRepository;
    use crate::snippet::permissions::PERMISSION_DENIED;

    struct Fixture {
        svc: SnippetService<MockSnippetRepository>,
        alice: AuthUser,
        bob: AuthUser,
    }

    fn fixture() -> Fixture {
        let repo = Arc::new(MockSnippetRepository::default());
        let alice = AuthUser { id: Uuid::new_v4(), username: "alice".into() };
        let bob = AuthUser { id: Uuid::new_v4(), username: "bob".into() };
        repo.add_owner(alice.id, &alice.username);
        repo.add_owner(bob.id, &bob.username);
        Fixture { svc: SnippetService::new(repo, SnippetDefaults::default()), alice, bob }
    }

    fn input(code: &str) -> SnippetInput {
        SnippetInput { code: code.into(), ..Default::default() }
    }

    #[tokio::test]
    async fn create_then_get_returns_same_fields() {
        let f = fixture();
        let created = f
            .svc
            .create(&f.alice, SnippetInput { title: "hello".into(), language: Some("Rust".into()), linenos: true, ..input("fn main() {}\n") })
            .await
            .unwrap();
        let fetched = f.svc.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.language, "rust");
        assert_eq!(fetched.style, "InspiredGitHub");
        assert_eq!(fetched.owner_id, f.alice.id);
        assert!(fetched.highlighted.contains("<title>hello</title>"));
        assert!(fetched.highlighted.contains("class=\"lineno\""));
    }

    #[tokio::test]
    async fn invalid_fields_are_reported_together() {
        let f = fixture();
        let bad = SnippetInput {
            title: "x".repeat(101),
            code: " ".into(),
            linenos: false,
            language: Some("klingon".into()),
            style: Some("no-such-theme".into()),
        };
        match f.svc.create(&f.alice, bad).await.unwrap_err() {
            ServiceError::Validation(errs) => {
                for field in ["title", "code", "language", "style"] {
                    assert!(errs.get(field).is_some(), "missing {field}");
                }
                assert_eq!(errs.get("language").unwrap(), ["\"klingon\" is not a valid choice."]);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(f.svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn only_owner_may_update_or_delete() {
        let f = fixture();
        let s = f.svc.create(&f.alice, input("a = 1")).await.unwrap();

        let err = f.svc.update(&f.bob, s.id, input("b = 2")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(ref m) if m == PERMISSION_DENIED));
        assert!(matches!(f.svc.delete(&f.bob, s.id).await, Err(ServiceError::Forbidden(_))));
        assert_eq!(f.svc.get(s.id).await.unwrap().code, "a = 1");

        let updated = f.svc.update(&f.alice, s.id, input("a = 2")).await.unwrap();
        assert_eq!(updated.code, "a = 2");
        assert_eq!(updated.created, s.created);
        assert_eq!(updated.owner, "alice");
    }

    #[tokio::test]
    async fn update_resets_omitted_fields_to_defaults() {
        let f = fixture();
        let s = f
            .svc
            .create(&f.alice, SnippetInput { title: "t".into(), language: Some("rs".into()), style: Some("base16-ocean.dark".into()), linenos: true, ..input("x") })
            .await
            .unwrap();
        let updated = f.svc.update(&f.alice, s.id, input("y")).await.unwrap();
        assert_eq!(updated.title, "");
        assert_eq!(updated.language, "python");
        assert_eq!(updated.style, "InspiredGitHub");
        assert!(!updated.linenos);
        assert_ne!(updated.highlighted, s.highlighted);
    }

    #[tokio::test]
    async fn permission_checked_before_validation() {
        let f = fixture();
        let s = f.svc.create(&f.alice, input("x")).await.unwrap();
        let err = f.svc.update(&f.bob, s.id, input("")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn missing_snippet_is_not_found() {
        let f = fixture();
        let id = Uuid::new_v4();
        assert!(matches!(f.svc.get(id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(f.svc.update(&f.alice, id, input("x")).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(f.svc.delete(&f.alice, id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(f.svc.highlighted(id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let f = fixture();
        let s = f.svc.create(&f.alice, input("x")).await.unwrap();
        f.svc.delete(&f.alice, s.id).await.unwrap();
        assert!(matches!(f.svc.get(s.id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn highlighted_reads_do_not_mutate() {
        let f = fixture();
        let s = f.svc.create(&f.alice, input("print('hi')")).await.unwrap();
        let first = f.svc.highlighted(s.id).await.unwrap();
        let second = f.svc.highlighted(s.id).await.unwrap();
        assert_eq!(first, s.highlighted);
        assert_eq!(first, second);
        assert_eq!(f.svc.get(s.id).await.unwrap(), s);
    }

    #[tokio::test]
    async fn pages_follow_creation_order() {
        let f = fixture();
        for i in 0..5 {
            f.svc.create(&f.alice, input(&format!("x = {i}"))).await.unwrap();
        }
        let page = f.svc.page(Pagination::new(2, 2)).await.unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.items.iter().map(|s| s.code.as_str()).collect::<Vec<_>>(), ["x = 2", "x = 3"]);
        assert!(page.has_next() && page.has_previous());
    }
}
