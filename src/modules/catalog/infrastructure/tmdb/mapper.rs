use super::models::{TmdbMovieDetail, TmdbMovieSummary};
use crate::modules::catalog::domain::entities::{
    CatalogGenre, CatalogMovieDetail, CatalogMovieSummary,
};
use crate::shared::errors::AppError;
use chrono::NaiveDate;

const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// TMDB specific mapper: validates wire payloads into the typed domain
/// structures. A payload missing a required field is rejected here, before
/// it reaches the resolver.
#[derive(Debug, Clone, Default)]
pub struct TmdbMapper;

impl TmdbMapper {
    pub fn new() -> Self {
        Self
    }

    pub fn map_summary(&self, summary: TmdbMovieSummary) -> Result<CatalogMovieSummary, AppError> {
        let title = summary
            .title
            .or(summary.original_title)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                AppError::MalformedResponse(format!(
                    "TMDB search hit {} has no usable title",
                    summary.id
                ))
            })?;

        Ok(CatalogMovieSummary {
            tmdb_id: summary.id,
            title,
        })
    }

    pub fn map_detail(&self, detail: TmdbMovieDetail) -> Result<CatalogMovieDetail, AppError> {
        let title = detail
            .title
            .clone()
            .or(detail.original_title.clone())
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                AppError::MalformedResponse(format!(
                    "TMDB detail {} has no usable title",
                    detail.id
                ))
            })?;

        let genres = detail
            .genres
            .unwrap_or_default()
            .into_iter()
            .map(|g| CatalogGenre {
                tmdb_id: g.id,
                name: g.name,
            })
            .collect();

        Ok(CatalogMovieDetail {
            tmdb_id: detail.id,
            title,
            overview: detail.overview.unwrap_or_default(),
            release_date: Self::parse_release_date(detail.release_date.as_deref()),
            poster_path: detail.poster_path.map(|p| Self::build_image_url(&p)),
            backdrop_path: detail.backdrop_path.map(|p| Self::build_image_url(&p)),
            vote_average: detail.vote_average.unwrap_or(0.0),
            vote_count: detail.vote_count.unwrap_or(0),
            popularity: detail.popularity.unwrap_or(0.0),
            adult: detail.adult.unwrap_or(false),
            original_language: detail.original_language.unwrap_or_default(),
            genres,
        })
    }

    /// The catalog sends dates as "YYYY-MM-DD" and sometimes as an empty
    /// string for unreleased titles.
    fn parse_release_date(raw: Option<&str>) -> Option<NaiveDate> {
        raw.filter(|s| !s.is_empty())
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
    }

    fn build_image_url(file_path: &str) -> String {
        format!("{}{}", IMAGE_BASE_URL, file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::super::models::TmdbGenre;
    use super::*;

    fn detail_fixture() -> TmdbMovieDetail {
        TmdbMovieDetail {
            id: 550,
            title: Some("Fight Club".to_string()),
            original_title: Some("Fight Club".to_string()),
            original_language: Some("en".to_string()),
            overview: Some("An insomniac office worker...".to_string()),
            poster_path: Some("/poster.jpg".to_string()),
            backdrop_path: None,
            release_date: Some("1999-10-15".to_string()),
            vote_average: Some(8.4),
            vote_count: Some(27000),
            popularity: Some(61.0),
            adult: Some(false),
            genres: Some(vec![TmdbGenre {
                id: 18,
                name: "Drama".to_string(),
            }]),
            runtime: Some(139),
            status: Some("Released".to_string()),
            tagline: None,
            homepage: None,
            imdb_id: Some("tt0137523".to_string()),
        }
    }

    #[test]
    fn maps_detail_with_image_urls_and_date() {
        let mapped = TmdbMapper::new().map_detail(detail_fixture()).unwrap();

        assert_eq!(mapped.tmdb_id, 550);
        assert_eq!(mapped.title, "Fight Club");
        assert_eq!(
            mapped.poster_path.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster.jpg")
        );
        assert!(mapped.backdrop_path.is_none());
        assert_eq!(
            mapped.release_date,
            NaiveDate::from_ymd_opt(1999, 10, 15)
        );
        assert_eq!(mapped.genres.len(), 1);
        assert_eq!(mapped.genres[0].tmdb_id, 18);
    }

    #[test]
    fn rejects_detail_without_title() {
        let mut detail = detail_fixture();
        detail.title = None;
        detail.original_title = None;

        let err = TmdbMapper::new().map_detail(detail).unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
    }

    #[test]
    fn empty_release_date_maps_to_none() {
        let mut detail = detail_fixture();
        detail.release_date = Some(String::new());

        let mapped = TmdbMapper::new().map_detail(detail).unwrap();
        assert!(mapped.release_date.is_none());
    }

    #[test]
    fn summary_falls_back_to_original_title() {
        let summary = TmdbMovieSummary {
            id: 603,
            title: None,
            original_title: Some("The Matrix".to_string()),
            original_language: None,
            overview: None,
            poster_path: None,
            backdrop_path: None,
            release_date: None,
            vote_average: None,
            vote_count: None,
            popularity: None,
            genre_ids: None,
            adult: None,
        };

        let mapped = TmdbMapper::new().map_summary(summary).unwrap();
        assert_eq!(mapped.title, "The Matrix");
    }
}
