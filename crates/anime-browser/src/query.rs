//! Maps navigation state to catalog URLs.

use crate::state::{Category, Navigation, ALL, NATIVE_SORT};
use jikan_client::ApiBase;
use reqwest::Url;

/// A filter combination the ranking endpoint cannot serve
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Genre filtering requires using the search feature. Please use the search box for genre filtering.")]
    GenreUnsupported,

    #[error("Sorting requires client-side implementation. Currently sorted by score as provided by the API.")]
    SortUnsupported,
}

/// Build the list URL for `nav`
///
/// Search ignores every filter. Ranking views reject a genre other than
/// "all" and any sort other than the native score order.
pub fn build_list_url(base: &ApiBase, nav: &Navigation) -> Result<Url, Rejection> {
    let page = nav.page.to_string();

    if nav.category == Category::Search {
        let mut url = base.endpoint(&["anime"]);
        url.query_pairs_mut()
            .append_pair("q", &nav.query)
            .append_pair("page", &page);
        return Ok(url);
    }

    if nav.filters.genre != ALL {
        return Err(Rejection::GenreUnsupported);
    }
    if nav.filters.sort != NATIVE_SORT {
        return Err(Rejection::SortUnsupported);
    }

    let mut url = base.endpoint(&["top", "anime"]);
    {
        let mut pairs = url.query_pairs_mut();
        match nav.category {
            Category::Airing => {
                pairs.append_pair("filter", "airing");
            }
            Category::Upcoming => {
                pairs.append_pair("filter", "upcoming");
            }
            _ => {}
        }

        // An explicit type filter replaces the movie view's own type
        if nav.filters.anime_type != ALL {
            pairs.append_pair("type", &nav.filters.anime_type);
        } else if nav.category == Category::Movie {
            pairs.append_pair("type", "movie");
        }

        pairs.append_pair("page", &page);
    }

    Ok(url)
}

/// URL of the full record for `mal_id`
pub fn build_detail_url(base: &ApiBase, mal_id: u32) -> Url {
    base.endpoint(&["anime", &mal_id.to_string(), "full"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FilterKind, Filters};

    fn base() -> ApiBase {
        ApiBase::parse("https://api.jikan.moe/v4").unwrap()
    }

    fn nav(category: Category, page: u32) -> Navigation {
        Navigation {
            page,
            ..Navigation::new(category)
        }
    }

    #[test]
    fn test_category_endpoints() {
        let base = base();
        let cases = [
            (Category::Top, "https://api.jikan.moe/v4/top/anime?page=1"),
            (
                Category::Airing,
                "https://api.jikan.moe/v4/top/anime?filter=airing&page=1",
            ),
            (
                Category::Upcoming,
                "https://api.jikan.moe/v4/top/anime?filter=upcoming&page=1",
            ),
            (
                Category::Movie,
                "https://api.jikan.moe/v4/top/anime?type=movie&page=1",
            ),
        ];

        for (category, expected) in cases {
            let url = build_list_url(&base, &nav(category, 1)).unwrap();
            assert_eq!(url.as_str(), expected, "category {}", category);
        }
    }

    #[test]
    fn test_page_is_carried() {
        let url = build_list_url(&base(), &nav(Category::Airing, 7)).unwrap();
        assert_eq!(url.query(), Some("filter=airing&page=7"));
    }

    #[test]
    fn test_type_filter_is_passed_verbatim() {
        let mut nav = nav(Category::Top, 2);
        nav.filters.set(FilterKind::Type, "ova");
        let url = build_list_url(&base(), &nav).unwrap();
        assert_eq!(url.query(), Some("type=ova&page=2"));

        nav.category = Category::Movie;
        let url = build_list_url(&base(), &nav).unwrap();
        assert_eq!(url.query(), Some("type=ova&page=2"));
    }

    #[test]
    fn test_unsupported_filters_are_rejected() {
        for category in [
            Category::Top,
            Category::Airing,
            Category::Upcoming,
            Category::Movie,
        ] {
            let mut genre = nav(category, 1);
            genre.filters.set(FilterKind::Genre, "action");
            assert_eq!(
                build_list_url(&base(), &genre),
                Err(Rejection::GenreUnsupported)
            );

            let mut sort = nav(category, 1);
            sort.filters.set(FilterKind::Sort, "popularity");
            assert_eq!(
                build_list_url(&base(), &sort),
                Err(Rejection::SortUnsupported)
            );
        }
    }

    #[test]
    fn test_search_ignores_filters() {
        let mut nav = nav(Category::Search, 1);
        nav.query = "Naruto".to_string();
        nav.filters = Filters {
            anime_type: "tv".to_string(),
            genre: "action".to_string(),
            sort: "title".to_string(),
        };

        let url = build_list_url(&base(), &nav).unwrap();
        assert_eq!(url.as_str(), "https://api.jikan.moe/v4/anime?q=Naruto&page=1");
    }

    #[test]
    fn test_search_text_is_escaped() {
        let mut nav = nav(Category::Search, 3);
        nav.query = "Fullmetal Alchemist: Brotherhood & more".to_string();

        let url = build_list_url(&base(), &nav).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                (
                    "q".to_string(),
                    "Fullmetal Alchemist: Brotherhood & more".to_string()
                ),
                ("page".to_string(), "3".to_string()),
            ]
        );
        assert!(!url.as_str().contains(' '));
    }

    #[test]
    fn test_detail_url() {
        assert_eq!(
            build_detail_url(&base(), 5114).as_str(),
            "https://api.jikan.moe/v4/anime/5114/full"
        );
    }
}
