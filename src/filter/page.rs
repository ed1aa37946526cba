/// Skip/limit pair computed from raw `page` / `pageLimit` query values.
///
/// Parsing never fails: absent or non-numeric input falls back to the
/// defaults, and values below 1 clamp to 1. The limit is additionally capped
/// by the configured maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: usize,
    pub limit: usize,
}

pub const DEFAULT_PAGE: usize = 1;

impl Page {
    pub fn from_raw(page: Option<&str>, page_limit: Option<&str>) -> Self {
        let config = &crate::config::CONFIG.pagination;
        Self::from_raw_with(page, page_limit, config.default_page_limit, config.max_page_limit)
    }

    fn from_raw_with(
        page: Option<&str>,
        page_limit: Option<&str>,
        default_limit: usize,
        max_limit: Option<usize>,
    ) -> Self {
        let page = parse_positive(page).unwrap_or(DEFAULT_PAGE);
        let mut limit = parse_positive(page_limit).unwrap_or(default_limit);
        if let Some(max) = max_limit {
            if limit > max {
                tracing::warn!("pageLimit {} exceeds max {}, capping to max", limit, max);
                limit = max;
            }
        }
        // Saturate: an absurdly large page must degrade to an empty page,
        // never abort the request.
        Self { skip: page.saturating_sub(1).saturating_mul(limit), limit }
    }
}

/// Non-throwing integer parse; anything unusable (missing, garbage, zero,
/// negative) is `None` so the caller's default applies.
fn parse_positive(raw: Option<&str>) -> Option<usize> {
    let n = raw?.trim().parse::<i64>().ok()?;
    if n < 1 {
        tracing::warn!("non-positive page value {}, clamping to 1", n);
        return Some(1);
    }
    Some(n as usize)
}
