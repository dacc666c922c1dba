/* # Why have a dedicated book model?

The Book type is the single record shape the whole service operates on. The
model separates the stored record (Book, with a store-assigned id) from the
client-supplied input (BookDraft, whose fields are optional until validated),
so the validation rules live next to the data they guard rather than inside
the HTTP handlers.
*/

use serde::{Deserialize, Serialize};

use libris_base::{LibrisError, LibrisResult};

/// Validation message returned when a create/update body is unusable.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Title and author are required";

/// Unique identifier for a book.
///
/// Ids are assigned by the store from a monotonically increasing counter and
/// are never reused, even after the record is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookId(u64);

impl BookId {
    /// Create a BookId from a raw integer.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the id as an integer.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Parse a BookId from a URL path segment.
    ///
    /// A non-numeric segment yields `None`, which callers treat the same as
    /// a valid-but-absent id (a lookup miss), preserving the original
    /// behavior of the service.
    pub fn from_path_segment(segment: &str) -> Option<Self> {
        segment.parse::<u64>().ok().map(Self)
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single catalog record.
///
/// JSON shape: `{"id": <int>, "title": <string>, "author": <string>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    id: BookId,
    title: String,
    author: String,
}

impl Book {
    /// Create a book record. The id is expected to come from the store's
    /// counter; this constructor does not enforce uniqueness.
    pub fn new(id: BookId, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
        }
    }

    /// The store-assigned id.
    pub fn id(&self) -> BookId {
        self.id
    }

    /// The book title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The book author.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Replace title and author in place, keeping the id.
    pub(crate) fn replace_fields(&mut self, title: String, author: String) {
        self.title = title;
        self.author = author;
    }
}

/// Client-supplied fields for creating or updating a book.
///
/// Both fields are optional at the deserialization layer so that a partial
/// body parses into a draft and fails validation with the service's own
/// message instead of a serde error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

impl BookDraft {
    /// Parse a draft from a JSON request body.
    ///
    /// An empty or malformed body yields an empty draft, which then fails
    /// validation. This mirrors the original service, where an unparsed body
    /// was indistinguishable from an empty object.
    pub fn from_json(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }

    /// Validate the draft, yielding the title and author.
    ///
    /// Fails with a validation error if either field is missing or empty.
    pub fn validated(self) -> LibrisResult<(String, String)> {
        match (self.title, self.author) {
            (Some(title), Some(author)) if !title.is_empty() && !author.is_empty() => {
                Ok((title, author))
            }
            _ => Err(Box::new(LibrisError::validation(REQUIRED_FIELDS_MESSAGE))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_base::error::ErrorKind;

    #[test]
    fn test_book_id_from_path_segment() {
        assert_eq!(BookId::from_path_segment("42"), Some(BookId::new(42)));
        assert_eq!(BookId::from_path_segment("0"), Some(BookId::new(0)));
        assert_eq!(BookId::from_path_segment("abc"), None);
        assert_eq!(BookId::from_path_segment(""), None);
        assert_eq!(BookId::from_path_segment("-1"), None);
        assert_eq!(BookId::from_path_segment("1.5"), None);
    }

    #[test]
    fn test_book_accessors() {
        let book = Book::new(BookId::new(1), "Dune", "Herbert");
        assert_eq!(book.id(), BookId::new(1));
        assert_eq!(book.title(), "Dune");
        assert_eq!(book.author(), "Herbert");
    }

    #[test]
    fn test_book_json_shape() {
        let book = Book::new(BookId::new(3), "Dune", "Herbert");
        let json = serde_json::to_string(&book).unwrap();
        assert_eq!(json, r#"{"id":3,"title":"Dune","author":"Herbert"}"#);
    }

    #[test]
    fn test_draft_validated_success() {
        let draft = BookDraft::from_json(br#"{"title":"Dune","author":"Herbert"}"#);
        let (title, author) = draft.validated().unwrap();
        assert_eq!(title, "Dune");
        assert_eq!(author, "Herbert");
    }

    #[test]
    fn test_draft_missing_field_fails_validation() {
        let draft = BookDraft::from_json(br#"{"title":"Dune"}"#);
        let err = draft.validated().unwrap_err();
        match err.kind() {
            ErrorKind::Validation { message } => {
                assert_eq!(message, REQUIRED_FIELDS_MESSAGE);
            }
            _ => panic!("Expected Validation variant"),
        }
    }

    #[test]
    fn test_draft_empty_field_fails_validation() {
        let draft = BookDraft::from_json(br#"{"title":"","author":"X"}"#);
        assert!(draft.validated().is_err());

        let draft = BookDraft::from_json(br#"{"title":"X","author":""}"#);
        assert!(draft.validated().is_err());
    }

    #[test]
    fn test_draft_from_malformed_body_is_empty() {
        let draft = BookDraft::from_json(b"not json at all");
        assert!(draft.title.is_none());
        assert!(draft.author.is_none());
        assert!(draft.validated().is_err());

        let draft = BookDraft::from_json(b"");
        assert!(draft.validated().is_err());
    }

    #[test]
    fn test_draft_ignores_extra_fields() {
        let draft = BookDraft::from_json(br#"{"title":"Dune","author":"Herbert","year":1965}"#);
        assert!(draft.validated().is_ok());
    }
}
