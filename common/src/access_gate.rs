//! Presentation rules per access tier.
//!
//! The tier comes from the catalog service with every result; nothing here
//! changes it. Counts are never invented: `total_count` is passed through and
//! the visible count never exceeds it.

use crate::search_result::{AccessLevel, FetchResult, ListingSummary};

pub const SIGN_IN_HREF: &str = "/login";
pub const REGISTER_HREF: &str = "/login/register";
pub const SUBSCRIBE_HREF: &str = "/subscribe";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    SignInPrompt,
    SubscribePrompt,
    Informational,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerLink {
    pub label: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub level: AccessLevel,
    pub visible: u64,
    pub total: u64,
    pub text: String,
    pub links: Vec<BannerLink>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GatedResult<'a> {
    pub items: &'a [ListingSummary],
    pub visible_count: u64,
    pub total_count: u64,
    pub access_level: AccessLevel,
    pub banner: Option<Banner>,
}

/// Banner dismissal for the current session. A dismissal only holds for the
/// tier it was made under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BannerDismissal {
    dismissed_for: Option<AccessLevel>,
}

impl BannerDismissal {
    pub fn dismiss(&mut self, level: AccessLevel) {
        self.dismissed_for = Some(level);
    }

    pub fn is_dismissed(&self, level: AccessLevel) -> bool {
        self.dismissed_for == Some(level)
    }
}

pub fn apply_gate<'a>(result: &'a FetchResult, dismissal: &BannerDismissal) -> GatedResult<'a> {
    let total = result.total_count;
    let (items, visible) = match result.access_level {
        AccessLevel::Full => (result.items.as_slice(), total),
        AccessLevel::Anonymous | AccessLevel::Limited => {
            let reported = result.visible_count.unwrap_or(result.items.len() as u64).min(total);
            let shown = result.items.len().min(usize::try_from(reported).unwrap_or(usize::MAX));
            (&result.items[..shown], reported)
        }
    };
    let banner = (!dismissal.is_dismissed(result.access_level)).then(|| banner_for(result.access_level, visible, total));
    GatedResult { items, visible_count: visible, total_count: total, access_level: result.access_level, banner }
}

fn banner_for(level: AccessLevel, visible: u64, total: u64) -> Banner {
    let (kind, text, links) = match level {
        AccessLevel::Anonymous => (
            BannerKind::SignInPrompt,
            format!("Показано {visible} из {total} лотов. Войдите или зарегистрируйтесь, чтобы увидеть больше."),
            vec![
                BannerLink { label: "Войти", href: SIGN_IN_HREF },
                BannerLink { label: "Регистрация", href: REGISTER_HREF },
            ],
        ),
        AccessLevel::Limited => (
            BannerKind::SubscribePrompt,
            format!("Показано {visible} из {total} лотов. Оформите подписку, чтобы открыть все."),
            vec![BannerLink { label: "Оформить подписку", href: SUBSCRIBE_HREF }],
        ),
        AccessLevel::Full => (BannerKind::Informational, format!("Найдено лотов: {total}"), vec![]),
    };
    Banner { kind, level, visible, total, text, links }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_state::QueryState;
    use pretty_assertions::assert_eq;

    fn listing(i: usize) -> ListingSummary {
        ListingSummary {
            id: format!("lot-{i}"),
            title: format!("Лот {i}"),
            start_price: Some(1000 * i as u64),
            bidding_type: None,
            categories: vec![],
            image_url: None,
            coordinates: None,
        }
    }

    fn result(level: AccessLevel, items: usize, total: u64, visible_count: Option<u64>) -> FetchResult {
        FetchResult {
            items: (0..items).map(listing).collect(),
            total_count: total,
            total_pages: 1,
            access_level: level,
            visible_count,
            ..FetchResult::empty(QueryState::default())
        }
    }

    #[test]
    fn anonymous_map_result_keeps_server_items_and_prompts_sign_in() {
        let result = result(AccessLevel::Anonymous, 10, 50, None);
        let gated = apply_gate(&result, &BannerDismissal::default());
        assert_eq!(gated.items, result.items.as_slice());
        assert_eq!((gated.visible_count, gated.total_count), (10, 50));
        let banner = gated.banner.expect("banner");
        assert_eq!(banner.kind, BannerKind::SignInPrompt);
        assert!(banner.text.starts_with("Показано 10 из 50"));
        assert_eq!(banner.links.iter().map(|l| l.href).collect::<Vec<_>>(), vec![SIGN_IN_HREF, REGISTER_HREF]);
    }

    #[test]
    fn limited_tier_truncates_to_the_reported_subset() {
        let result = result(AccessLevel::Limited, 8, 40, Some(5));
        let gated = apply_gate(&result, &BannerDismissal::default());
        assert_eq!(gated.items.len(), 5);
        assert_eq!(gated.visible_count, 5);
        assert_eq!(gated.banner.map(|b| b.kind), Some(BannerKind::SubscribePrompt));
    }

    #[test]
    fn full_tier_shows_everything() {
        let result = result(AccessLevel::Full, 12, 12, Some(3));
        let gated = apply_gate(&result, &BannerDismissal::default());
        assert_eq!(gated.items.len(), 12);
        assert_eq!(gated.visible_count, gated.total_count);
        assert_eq!(gated.banner.map(|b| b.kind), Some(BannerKind::Informational));
    }

    #[test]
    fn visible_count_never_exceeds_total() {
        let result = result(AccessLevel::Anonymous, 10, 4, Some(10));
        let gated = apply_gate(&result, &BannerDismissal::default());
        assert!(gated.visible_count <= gated.total_count);
        assert_eq!(gated.items.len(), 4);
    }

    #[test]
    fn dismissal_does_not_survive_a_tier_change() {
        let mut dismissal = BannerDismissal::default();
        dismissal.dismiss(AccessLevel::Full);
        assert!(apply_gate(&result(AccessLevel::Full, 1, 1, None), &dismissal).banner.is_none());
        assert!(apply_gate(&result(AccessLevel::Limited, 1, 9, None), &dismissal).banner.is_some());
    }
}
