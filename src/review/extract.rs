//! Field extraction over one rendered review page
//!
//! All three entry points are pure functions of the parsed document:
//! re-running them on the same markup yields the same result. Absence of
//! expected structure is reported as a value (`Extraction::NotFound`, zero,
//! `None`), never as an error; the driver treats absence as possibly
//! transient and retries by re-fetching.

use crate::review::labels::LabelTable;
use crate::review::record::Review;
use scraper::{ElementRef, Html, Selector};

/// Reviews served per page by the source site
///
/// An external property of the site, not configurable here. The page budget
/// for an entity is `total / REVIEWS_PER_PAGE + 1`.
pub const REVIEWS_PER_PAGE: u32 = 15;

/// Site prefix for review pages; pager and profile hrefs are site-relative
pub const SITE_BASE: &str = "https://www.tripadvisor.com.tr";

// Class-chain selectors fingerprint the currently deployed renderer. They
// are expected to rot when the site ships a new frontend; keep them in one
// place.
const CONTAINER: &str = "div.LMGCx.f.e";
const REVIEW_ITEM: &str = "div.JVaPo.Gi.kQjeB";
const AUTHOR_LINK: &str = "a.BMQDV._F.Gv.wSSLS.SwZTJ.FGwzt.ukgoS";
const RATING_SVG: &str = "svg.evwcZ";
const RATING_PATH: &str = "path";
const VISIT_INFO: &str = "div.biGQs._P.fiohW.ezezH";
const REVIEW_BODY: &str = "span._d._c";
const SUB_RATING: &str = "div.biGQs._P.fiohW.biKBZ.navcl";
const HELPFUL_VOTES: &str = "span.biGQs._P.navcl";
const TOTAL_COUNT: &str = "div.biGQs._P.fiohW.kSNRl.KeZJf";
const PAGER_LINK: &str = "a.BrOJk.u.j.z._F._S.wSSLS.tIqAi.unMkR.xtNBb";

/// An empty star is recognized by this fragment of its SVG path data; the
/// rating is the count of path children NOT matching it. Heuristic: what
/// matters is "count of non-empty-star shapes", not this literal string; a
/// renderer change that keeps distinct path data for empty stars keeps the
/// semantics.
const EMPTY_STAR_PATH_FRAGMENT: &str = "a9.983";

/// Outcome of running the review extractor over one page
///
/// `NotFound` marks absence of the expected structure: container missing or
/// holding zero items. Keeping it a value (instead of an error) lets the
/// driver's retry loop distinguish "render glitch, refetch" from real fetch
/// faults in the logs.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Found(Vec<Review>),
    NotFound,
}

/// The per-review selectors, parsed once per extraction pass
struct ReviewSelectors {
    container: Selector,
    item: Selector,
    author: Selector,
    rating: Selector,
    star_path: Selector,
    visit_info: Selector,
    body: Selector,
    sub_rating: Selector,
    helpful: Selector,
}

impl ReviewSelectors {
    fn new() -> Option<Self> {
        Some(Self {
            container: Selector::parse(CONTAINER).ok()?,
            item: Selector::parse(REVIEW_ITEM).ok()?,
            author: Selector::parse(AUTHOR_LINK).ok()?,
            rating: Selector::parse(RATING_SVG).ok()?,
            star_path: Selector::parse(RATING_PATH).ok()?,
            visit_info: Selector::parse(VISIT_INFO).ok()?,
            body: Selector::parse(REVIEW_BODY).ok()?,
            sub_rating: Selector::parse(SUB_RATING).ok()?,
            helpful: Selector::parse(HELPFUL_VOTES).ok()?,
        })
    }
}

/// Extracts every review on the page for the given entity
///
/// Each field resolves through its own selector and falls back to an empty
/// string or zero when its node is missing or unparsable; a review is never
/// dropped for missing sub-fields. Only a missing (or empty) container drops
/// the page, reported as `NotFound`.
pub fn extract_reviews(doc: &Html, entity_name: &str, labels: &LabelTable) -> Extraction {
    let Some(sel) = ReviewSelectors::new() else {
        return Extraction::NotFound;
    };

    let Some(container) = doc.select(&sel.container).next() else {
        return Extraction::NotFound;
    };

    let reviews: Vec<Review> = container
        .select(&sel.item)
        .map(|item| extract_one(item, &sel, entity_name, labels))
        .collect();

    if reviews.is_empty() {
        Extraction::NotFound
    } else {
        Extraction::Found(reviews)
    }
}

fn extract_one(
    item: ElementRef,
    sel: &ReviewSelectors,
    entity_name: &str,
    labels: &LabelTable,
) -> Review {
    let author = item.select(&sel.author).next();
    let user_name = author.map(text_of).unwrap_or_default();
    let user_profile_link = author
        .and_then(|a| a.value().attr("href"))
        .map(|href| format!("{}{}", SITE_BASE, href))
        .unwrap_or_default();

    let rating = item
        .select(&sel.rating)
        .next()
        .map(|svg| count_filled_stars(svg, &sel.star_path))
        .unwrap_or(0);

    let mut visit_info = item.select(&sel.visit_info);
    let visit_date = visit_info
        .next()
        .map(|el| labels.convert_visit_date(&text_of(el)))
        .unwrap_or_default();
    let travel_type = visit_info
        .next()
        .map(|el| labels.travel_type(&text_of(el)))
        .unwrap_or_default();

    // On the deployed markup the title anchor carries the same class chain as
    // the author anchor, so this resolves to the same node's text.
    let review_title = item.select(&sel.author).next().map(text_of).unwrap_or_default();

    let review_text = item.select(&sel.body).next().map(text_of).unwrap_or_default();

    // Four sub-scores in fixed order; the block only counts when all four
    // nodes are present, each parsing independently to 0 on bad text.
    let subs: Vec<u32> = item
        .select(&sel.sub_rating)
        .map(|el| parse_rating_text(&text_of(el)))
        .collect();
    let (value_rating, service_rating, food_rating, atmosphere_rating) = if subs.len() > 3 {
        (subs[0], subs[1], subs[2], subs[3])
    } else {
        (0, 0, 0, 0)
    };

    let helpful_vote_count = item
        .select(&sel.helpful)
        .next()
        .and_then(|el| {
            text_of(el)
                .split_whitespace()
                .next()
                .and_then(|token| token.parse().ok())
        })
        .unwrap_or(0);

    Review {
        restaurant_name: entity_name.to_string(),
        user_name,
        user_profile_link,
        rating,
        visit_date,
        travel_type,
        review_title,
        review_text,
        value_rating,
        service_rating,
        food_rating,
        atmosphere_rating,
        helpful_vote_count,
    }
}

/// Counts the rating widget's path children that are not empty stars
fn count_filled_stars(svg: ElementRef, star_path: &Selector) -> u32 {
    svg.select(star_path)
        .filter(|p| !p.value().attr("d").unwrap_or("").contains(EMPTY_STAR_PATH_FRAGMENT))
        .count() as u32
}

/// Parses a sub-score like "4,0" to its integer part, 0 when unparsable
fn parse_rating_text(text: &str) -> u32 {
    text.split(',')
        .next()
        .and_then(|token| token.trim().parse().ok())
        .unwrap_or(0)
}

/// Total review count declared on the page
///
/// Reads the third whitespace token of the count label, stripping thousands
/// separators and parentheses. Returns 0 when the label is absent or the
/// token is unparsable; 0 is a valid "nothing to page through" answer.
pub fn extract_total_reviews(doc: &Html) -> u32 {
    let Ok(sel) = Selector::parse(TOTAL_COUNT) else {
        return 0;
    };
    let Some(el) = doc.select(&sel).next() else {
        return 0;
    };

    text_of(el)
        .split_whitespace()
        .nth(2)
        .map(|token| token.replace(['.', '(', ')'], ""))
        .and_then(|token| token.parse().ok())
        .unwrap_or(0)
}

/// Resolves the next-page link from the pager anchors
///
/// On pages after the first, "previous" and "next" share the pager class and
/// appear in that order, so the second candidate is the forward link; the
/// first page only renders "next". This index rule mirrors an observed quirk
/// of the deployed pager markup; if the site ever ships a rel="next"
/// attribute, prefer that over candidate counting.
pub fn next_page_url(doc: &Html, current_page: usize) -> Option<String> {
    let sel = Selector::parse(PAGER_LINK).ok()?;
    let candidates: Vec<ElementRef> = doc.select(&sel).collect();
    if candidates.is_empty() {
        return None;
    }

    let idx = if current_page > 0 && candidates.len() > 1 {
        1
    } else {
        0
    };

    candidates[idx]
        .value()
        .attr("href")
        .filter(|href| !href.is_empty())
        .map(|href| format!("{}{}", SITE_BASE, href))
}

fn text_of(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> LabelTable {
        LabelTable::default()
    }

    /// A full review item with every field populated
    fn full_review_item() -> String {
        r##"
        <div class="JVaPo Gi kQjeB">
            <a class="BMQDV _F Gv wSSLS SwZTJ FGwzt ukgoS" href="/Profile/ayse-k">Ayşe K</a>
            <svg class="evwcZ">
                <path d="M 12 0 L 14 7 Z"></path>
                <path d="M 12 0 L 14 7 Z"></path>
                <path d="M 12 0 L 14 7 Z"></path>
                <path d="M 12 0 L 14 7 Z"></path>
                <path d="M 12 0 a9.983 9.983 0 0 0 0 19.97"></path>
            </svg>
            <div class="biGQs _P fiohW ezezH">Eyl 2023</div>
            <div class="biGQs _P fiohW ezezH">Çiftler</div>
            <span class="_d _c">Harika bir deneyimdi, kesinlikle tavsiye ederim.</span>
            <div class="biGQs _P fiohW biKBZ navcl">5,0</div>
            <div class="biGQs _P fiohW biKBZ navcl">4,0</div>
            <div class="biGQs _P fiohW biKBZ navcl">5,0</div>
            <div class="biGQs _P fiohW biKBZ navcl">3,0</div>
            <span class="biGQs _P navcl">12 kişi beğendi</span>
        </div>
        "##
        .to_string()
    }

    /// A review item with nothing but the item wrapper
    fn bare_review_item() -> String {
        r#"<div class="JVaPo Gi kQjeB"><p>unrelated</p></div>"#.to_string()
    }

    fn page_with_items(items: &str) -> Html {
        Html::parse_document(&format!(
            r#"<html><body><div class="LMGCx f e">{}</div></body></html>"#,
            items
        ))
    }

    #[test]
    fn test_extract_full_review() {
        let doc = page_with_items(&full_review_item());
        let Extraction::Found(reviews) = extract_reviews(&doc, "Şirvan Sofrası", &labels()) else {
            panic!("expected Found");
        };

        assert_eq!(reviews.len(), 1);
        let review = &reviews[0];
        assert_eq!(review.restaurant_name, "Şirvan Sofrası");
        assert_eq!(review.user_name, "Ayşe K");
        assert_eq!(
            review.user_profile_link,
            "https://www.tripadvisor.com.tr/Profile/ayse-k"
        );
        assert_eq!(review.rating, 4);
        assert_eq!(review.visit_date, "09.2023");
        assert_eq!(review.travel_type, "Couple");
        assert_eq!(review.review_title, "Ayşe K");
        assert_eq!(
            review.review_text,
            "Harika bir deneyimdi, kesinlikle tavsiye ederim."
        );
        assert_eq!(review.value_rating, 5);
        assert_eq!(review.service_rating, 4);
        assert_eq!(review.food_rating, 5);
        assert_eq!(review.atmosphere_rating, 3);
        assert_eq!(review.helpful_vote_count, 12);
    }

    #[test]
    fn test_missing_fields_default_without_dropping_record() {
        let doc = page_with_items(&bare_review_item());
        let Extraction::Found(reviews) = extract_reviews(&doc, "Kebapçı Halil", &labels()) else {
            panic!("expected Found");
        };

        assert_eq!(reviews.len(), 1);
        let review = &reviews[0];
        assert_eq!(review.restaurant_name, "Kebapçı Halil");
        assert_eq!(review.user_name, "");
        assert_eq!(review.user_profile_link, "");
        assert_eq!(review.rating, 0);
        assert_eq!(review.visit_date, "");
        assert_eq!(review.travel_type, "");
        assert_eq!(review.review_text, "");
        assert_eq!(review.value_rating, 0);
        assert_eq!(review.helpful_vote_count, 0);
    }

    #[test]
    fn test_partial_sub_ratings_all_default() {
        // Three sub-score nodes instead of four: the block doesn't count
        let item = r#"
        <div class="JVaPo Gi kQjeB">
            <div class="biGQs _P fiohW biKBZ navcl">5,0</div>
            <div class="biGQs _P fiohW biKBZ navcl">4,0</div>
            <div class="biGQs _P fiohW biKBZ navcl">3,0</div>
        </div>"#;
        let doc = page_with_items(item);
        let Extraction::Found(reviews) = extract_reviews(&doc, "X", &labels()) else {
            panic!("expected Found");
        };
        assert_eq!(reviews[0].value_rating, 0);
        assert_eq!(reviews[0].service_rating, 0);
    }

    #[test]
    fn test_unparsable_sub_rating_defaults_individually() {
        let item = r#"
        <div class="JVaPo Gi kQjeB">
            <div class="biGQs _P fiohW biKBZ navcl">5,0</div>
            <div class="biGQs _P fiohW biKBZ navcl">mükemmel</div>
            <div class="biGQs _P fiohW biKBZ navcl">4,0</div>
            <div class="biGQs _P fiohW biKBZ navcl">3,0</div>
        </div>"#;
        let doc = page_with_items(item);
        let Extraction::Found(reviews) = extract_reviews(&doc, "X", &labels()) else {
            panic!("expected Found");
        };
        assert_eq!(reviews[0].value_rating, 5);
        assert_eq!(reviews[0].service_rating, 0);
        assert_eq!(reviews[0].food_rating, 4);
        assert_eq!(reviews[0].atmosphere_rating, 3);
    }

    #[test]
    fn test_container_absent_is_not_found() {
        let doc = Html::parse_document("<html><body><p>maintenance page</p></body></html>");
        assert_eq!(extract_reviews(&doc, "X", &labels()), Extraction::NotFound);
    }

    #[test]
    fn test_empty_container_is_not_found() {
        let doc = page_with_items("");
        assert_eq!(extract_reviews(&doc, "X", &labels()), Extraction::NotFound);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let doc = page_with_items(&full_review_item());
        let first = extract_reviews(&doc, "X", &labels());
        let second = extract_reviews(&doc, "X", &labels());
        assert_eq!(first, second);
    }

    #[test]
    fn test_star_count_ignores_paths_without_d() {
        // A path with no d attribute counts as filled, matching the source
        // behavior of treating only the known empty-star shape as empty
        let item = r#"
        <div class="JVaPo Gi kQjeB">
            <svg class="evwcZ">
                <path></path>
                <path d="M 1 1 a9.983 9.983 0 0 0"></path>
            </svg>
        </div>"#;
        let doc = page_with_items(item);
        let Extraction::Found(reviews) = extract_reviews(&doc, "X", &labels()) else {
            panic!("expected Found");
        };
        assert_eq!(reviews[0].rating, 1);
    }

    fn page_with_total(text: &str) -> Html {
        Html::parse_document(&format!(
            r#"<html><body><div class="biGQs _P fiohW kSNRl KeZJf">{}</div></body></html>"#,
            text
        ))
    }

    #[test]
    fn test_total_reviews_parses_third_token() {
        let doc = page_with_total("1-15 / 32 sonuç");
        assert_eq!(extract_total_reviews(&doc), 32);
    }

    #[test]
    fn test_total_reviews_strips_separators_and_parens() {
        let doc = page_with_total("1-15 / (1.234) sonuç");
        assert_eq!(extract_total_reviews(&doc), 1234);
    }

    #[test]
    fn test_total_reviews_absent_is_zero() {
        let doc = Html::parse_document("<html><body></body></html>");
        assert_eq!(extract_total_reviews(&doc), 0);
    }

    #[test]
    fn test_total_reviews_unparsable_is_zero() {
        let doc = page_with_total("çok fazla yorum var");
        assert_eq!(extract_total_reviews(&doc), 0);
    }

    fn page_with_pager(hrefs: &[&str]) -> Html {
        let anchors: String = hrefs
            .iter()
            .map(|href| {
                format!(
                    r#"<a class="BrOJk u j z _F _S wSSLS tIqAi unMkR xtNBb" href="{}"></a>"#,
                    href
                )
            })
            .collect();
        Html::parse_document(&format!("<html><body>{}</body></html>", anchors))
    }

    #[test]
    fn test_next_page_first_page_two_candidates_takes_first() {
        let doc = page_with_pager(&["/r-or15", "/r-or30"]);
        assert_eq!(
            next_page_url(&doc, 0),
            Some(format!("{}/r-or15", SITE_BASE))
        );
    }

    #[test]
    fn test_next_page_later_page_two_candidates_takes_second() {
        let doc = page_with_pager(&["/r-or0", "/r-or30"]);
        assert_eq!(
            next_page_url(&doc, 1),
            Some(format!("{}/r-or30", SITE_BASE))
        );
    }

    #[test]
    fn test_next_page_single_candidate_any_index_takes_it() {
        let doc = page_with_pager(&["/r-or15"]);
        assert_eq!(
            next_page_url(&doc, 0),
            Some(format!("{}/r-or15", SITE_BASE))
        );
        assert_eq!(
            next_page_url(&doc, 3),
            Some(format!("{}/r-or15", SITE_BASE))
        );
    }

    #[test]
    fn test_next_page_no_candidates_is_none() {
        let doc = Html::parse_document("<html><body></body></html>");
        assert_eq!(next_page_url(&doc, 0), None);
    }

    #[test]
    fn test_next_page_empty_href_is_none() {
        let doc = page_with_pager(&[""]);
        assert_eq!(next_page_url(&doc, 0), None);
    }
}
