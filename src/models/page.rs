use std::{fmt, str::FromStr};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortProperty {
    #[default]
    Id,
    Text,
}

impl SortProperty {
    pub const fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Text => "text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortError {
    #[error("unknown sort property '{0}'")]
    Property(String),

    #[error("unknown sort direction '{0}'")]
    Direction(String),
}

/// Ordering of a page, written on the wire as `property[,direction]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub property: SortProperty,
    pub direction: SortDirection,
}

impl Sort {
    pub const fn new(property: SortProperty, direction: SortDirection) -> Self {
        Self {
            property,
            direction,
        }
    }
}

impl FromStr for Sort {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',').map(str::trim);

        let property = match parts.next().unwrap_or_default() {
            "" | "id" => SortProperty::Id,
            "text" => SortProperty::Text,
            other => return Err(SortError::Property(other.to_string())),
        };

        let direction = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            None | Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            Some(other) => return Err(SortError::Direction(other.to_string())),
        };

        Ok(Self::new(property, direction))
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{},{}", self.property.column(), direction)
    }
}

/// A window over the ordered note collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Sort,
}

impl PageRequest {
    /// Page sizes are clamped to `1..=MAX_PAGE_SIZE`.
    pub fn new(page: u32, size: u32, sort: Sort) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
            sort,
        }
    }

    pub const fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE, Sort::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub const fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            number: request.page,
            size: request.size,
            total_elements,
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(u64::from(self.size.max(1)))
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.number) + 1 < self.total_pages()
    }

    pub const fn has_previous(&self) -> bool {
        self.number > 0
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_parses_property_and_direction() {
        assert_eq!("id,desc".parse::<Sort>().unwrap(), Sort::new(SortProperty::Id, SortDirection::Desc));
        assert_eq!("text".parse::<Sort>().unwrap(), Sort::new(SortProperty::Text, SortDirection::Asc));
        assert_eq!("text, DESC".parse::<Sort>().unwrap().direction, SortDirection::Desc);
    }

    #[test]
    fn sort_rejects_unknown_input() {
        assert_eq!(
            "created_at,asc".parse::<Sort>(),
            Err(SortError::Property("created_at".to_string()))
        );
        assert_eq!(
            "id,sideways".parse::<Sort>(),
            Err(SortError::Direction("sideways".to_string()))
        );
    }

    #[test]
    fn sort_display_matches_wire_format() {
        let sort = Sort::new(SortProperty::Text, SortDirection::Desc);
        assert_eq!(sort.to_string(), "text,desc");
        assert_eq!(sort.to_string().parse::<Sort>().unwrap(), sort);
    }

    #[test]
    fn page_request_clamps_size() {
        assert_eq!(PageRequest::new(0, 0, Sort::default()).size, 1);
        assert_eq!(PageRequest::new(0, 50_000, Sort::default()).size, MAX_PAGE_SIZE);
        assert_eq!(PageRequest::new(3, 20, Sort::default()).offset(), 60);
    }

    #[test]
    fn page_navigation_bounds() {
        let request = PageRequest::new(0, 2, Sort::default());
        let page = Page::new(vec![1, 2], &request, 5);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
        assert!(!page.has_previous());

        let last = Page::new(vec![5], &PageRequest::new(2, 2, Sort::default()), 5);
        assert!(!last.has_next());
        assert!(last.has_previous());

        let empty: Page<i32> = Page::new(Vec::new(), &PageRequest::default(), 0);
        assert_eq!(empty.total_pages(), 0);
        assert!(!empty.has_next());
    }
}
