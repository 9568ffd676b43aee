use std::{fmt, str::FromStr};

use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("no route matches '{0}'")]
    Unknown(String),

    #[error("'{0}' is not a valid note id")]
    InvalidId(String),
}

/// Client-side routes, addressed by URL fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    NoteList { page: u32 },
    NoteDetail(i64),
    NoteNew,
    NoteEdit(i64),
    NoteDelete(i64),
}

impl Default for Route {
    fn default() -> Self {
        Self::NoteList { page: 0 }
    }
}

impl Route {
    pub fn parse(fragment: &str) -> Result<Self, RouteError> {
        let fragment = fragment.trim().trim_start_matches('#').trim_matches('/');
        let (path, query) = fragment.split_once('?').unwrap_or((fragment, ""));
        let segments: Vec<&str> = path.split('/').collect();

        match segments.as_slice() {
            [""] | ["note"] => Ok(Self::NoteList {
                page: page_param(query)?,
            }),
            ["note-new"] => Ok(Self::NoteNew),
            ["note", id] => Ok(Self::NoteDetail(parse_id(id)?)),
            ["note", id, "edit"] => Ok(Self::NoteEdit(parse_id(id)?)),
            ["note", id, "delete"] => Ok(Self::NoteDelete(parse_id(id)?)),
            _ => Err(RouteError::Unknown(fragment.to_string())),
        }
    }

    pub fn fragment(&self) -> String {
        match self {
            Self::NoteList { page: 0 } => "#/note".to_string(),
            Self::NoteList { page } => format!("#/note?page={page}"),
            Self::NoteDetail(id) => format!("#/note/{id}"),
            Self::NoteNew => "#/note-new".to_string(),
            Self::NoteEdit(id) => format!("#/note/{id}/edit"),
            Self::NoteDelete(id) => format!("#/note/{id}/delete"),
        }
    }

    /// Popup routes overlay the list instead of replacing it.
    pub const fn is_popup(&self) -> bool {
        matches!(self, Self::NoteNew | Self::NoteEdit(_) | Self::NoteDelete(_))
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fragment())
    }
}

fn parse_id(id: &str) -> Result<i64, RouteError> {
    id.parse().map_err(|_| RouteError::InvalidId(id.to_string()))
}

fn page_param(query: &str) -> Result<u32, RouteError> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "page")
        .map_or(Ok(0), |(_, value)| {
            value
                .parse()
                .map_err(|_| RouteError::Unknown(format!("page={value}")))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_route() {
        assert_eq!(Route::parse("#/note").unwrap(), Route::NoteList { page: 0 });
        assert_eq!(Route::parse("").unwrap(), Route::default());
        assert_eq!(Route::parse("note?page=3").unwrap(), Route::NoteList { page: 3 });
        assert_eq!(Route::parse("#/note/5").unwrap(), Route::NoteDetail(5));
        assert_eq!(Route::parse("/note-new").unwrap(), Route::NoteNew);
        assert_eq!(Route::parse("note/5/edit").unwrap(), Route::NoteEdit(5));
        assert_eq!(Route::parse("#/note/5/delete/").unwrap(), Route::NoteDelete(5));
    }

    #[test]
    fn page_parameter_is_url_decoded() {
        assert_eq!(Route::parse("note?page=%32").unwrap(), Route::NoteList { page: 2 });
        assert_eq!(
            Route::parse("note?sort=id%2Cdesc&page=4").unwrap(),
            Route::NoteList { page: 4 }
        );
        assert_eq!(Route::parse("note?size=5").unwrap(), Route::NoteList { page: 0 });
        assert_eq!(
            Route::parse("note?page=x%26y"),
            Err(RouteError::Unknown("page=x&y".to_string()))
        );
    }

    #[test]
    fn fragment_round_trips() {
        for route in [
            Route::NoteList { page: 0 },
            Route::NoteList { page: 2 },
            Route::NoteDetail(1),
            Route::NoteNew,
            Route::NoteEdit(1),
            Route::NoteDelete(1),
        ] {
            assert_eq!(route.fragment().parse::<Route>().unwrap(), route);
        }
    }

    #[test]
    fn rejects_bad_fragments() {
        assert_eq!(
            Route::parse("#/note/abc"),
            Err(RouteError::InvalidId("abc".to_string()))
        );
        assert_eq!(
            Route::parse("#/settings"),
            Err(RouteError::Unknown("settings".to_string()))
        );
        assert!(Route::parse("note?page=-1").is_err());
    }

    #[test]
    fn popup_routes() {
        assert!(Route::NoteNew.is_popup());
        assert!(Route::NoteEdit(1).is_popup());
        assert!(Route::NoteDelete(1).is_popup());
        assert!(!Route::NoteDetail(1).is_popup());
        assert!(!Route::default().is_popup());
    }
}
