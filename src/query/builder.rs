//! Builds Elasticsearch requests from normalized search requests

use super::{NormalizedRequest, PageLimits, SearchMode, FINAL_PRICE_FIELD, TITLE_FIELD};
use crate::config::IndexSettings;
use crate::error::Result;
use crate::search::SearchRequest;
use crate::es::{BoolQuery, EsSearchRequest, Query, Sort};

/// Query builder bound to the configured source indices
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    indices: IndexSettings,
    min_score: f64,
    limits: PageLimits,
}

impl QueryBuilder {
    pub fn new(indices: IndexSettings) -> Self {
        Self {
            indices,
            min_score: 1.0,
            limits: PageLimits::default(),
        }
    }

    /// Hits scoring below this are dropped by the engine
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn with_page_limits(mut self, limits: PageLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn page_limits(&self) -> &PageLimits {
        &self.limits
    }

    /// Validate and clamp a raw request with this builder's page limits
    pub fn normalize(&self, request: &SearchRequest) -> Result<NormalizedRequest> {
        NormalizedRequest::with_limits(request, &self.limits)
    }

    pub fn indices(&self) -> &IndexSettings {
        &self.indices
    }

    /// Build the `_search` call for one branch
    pub fn build(&self, request: &NormalizedRequest, mode: SearchMode) -> EsSearchRequest {
        EsSearchRequest {
            indices: self.target_indices(request),
            query: self.query(request, mode),
            min_score: self.min_score,
            sort: self.sort(request, mode),
            from: request.offset(),
            size: request.size,
        }
    }

    /// The one requested index if it is configured, otherwise all of them
    pub fn target_indices(&self, request: &NormalizedRequest) -> Vec<String> {
        match request
            .index
            .as_deref()
            .and_then(|name| self.indices.resolve(name))
        {
            Some(index) => vec![index.to_string()],
            None => self.indices.all(),
        }
    }

    fn query(&self, request: &NormalizedRequest, mode: SearchMode) -> Query {
        let mut query = BoolQuery::new();
        match mode {
            SearchMode::Exact => {
                for token in request.tokens() {
                    query = query.must(Query::match_phrase(TITLE_FIELD, token));
                }
            }
            SearchMode::Fuzzy => {
                // keeps the match required once the price filter adds a must clause
                query = query
                    .should(Query::match_query(TITLE_FIELD, &request.keyword))
                    .minimum_should_match(1);
            }
        }
        if let Some(filter) = price_filter(request) {
            query = query.must(filter);
        }
        query.into()
    }

    fn sort(&self, request: &NormalizedRequest, mode: SearchMode) -> Vec<Sort> {
        match mode {
            // field sorts distort fuzzy relevance ranking
            SearchMode::Fuzzy => vec![Sort::Score],
            SearchMode::Exact => {
                let (field, direction) = request.sort.field();
                vec![Sort::field(field, direction), Sort::Score]
            }
        }
    }
}

/// `min_price < price_end <= max_price`, only when a maximum is given
fn price_filter(request: &NormalizedRequest) -> Option<Query> {
    let max = request.max_price.as_ref()?;
    let mut range = Query::range(FINAL_PRICE_FIELD).lte(max);
    if let Some(min) = &request.min_price {
        range = range.gt(min);
    }
    Some(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::es::SortDirection;
    use crate::search::SearchRequest;

    fn normalize(request: SearchRequest) -> NormalizedRequest {
        NormalizedRequest::from_request(&request).unwrap()
    }

    fn builder() -> QueryBuilder {
        QueryBuilder::new(IndexSettings::default())
    }

    fn bool_query(query: &Query) -> &BoolQuery {
        match query {
            Query::Bool(b) => b,
            other => panic!("expected bool query, got {:?}", other),
        }
    }

    #[test]
    fn test_exact_requires_every_token() {
        let request = normalize(SearchRequest::simple("red  shoes"));
        let built = builder().build(&request, SearchMode::Exact);

        let query = bool_query(&built.query);
        assert_eq!(
            query.must,
            vec![
                Query::match_phrase("title", "red"),
                Query::match_phrase("title", "shoes"),
            ]
        );
        assert!(query.should.is_empty());
        assert_eq!(built.min_score, 1.0);
    }

    #[test]
    fn test_fuzzy_single_match_sorted_by_score() {
        let request = normalize(SearchRequest::simple("red shoes").with_sort("1"));
        let built = builder().build(&request, SearchMode::Fuzzy);

        let query = bool_query(&built.query);
        assert_eq!(query.should, vec![Query::match_query("title", "red shoes")]);
        assert_eq!(query.minimum_should_match, Some(1));
        assert!(query.must.is_empty());
        assert_eq!(built.sort, vec![Sort::Score]);
        assert_eq!(built.min_score, 1.0);
    }

    #[test]
    fn test_exact_sort_has_score_tiebreak() {
        let request = normalize(SearchRequest::simple("mouse").with_sort("1"));
        let built = builder().build(&request, SearchMode::Exact);
        assert_eq!(
            built.sort,
            vec![Sort::field("price_end", SortDirection::Desc), Sort::Score]
        );

        let request = normalize(SearchRequest::simple("mouse").with_sort("11"));
        let built = builder().build(&request, SearchMode::Exact);
        assert_eq!(built.sort[0], Sort::field("price_end", SortDirection::Asc));

        let request = normalize(SearchRequest::simple("mouse"));
        let built = builder().build(&request, SearchMode::Exact);
        assert_eq!(
            built.sort,
            vec![Sort::field("total_sale", SortDirection::Desc), Sort::Score]
        );
    }

    #[test]
    fn test_price_filter_in_both_modes() {
        let mut raw = SearchRequest::simple("mouse");
        raw.min_price = Some("10".to_string());
        raw.max_price = Some("50".to_string());
        let request = normalize(raw);

        for mode in [SearchMode::Exact, SearchMode::Fuzzy] {
            let built = builder().build(&request, mode);
            let query = bool_query(&built.query);
            assert!(
                query
                    .must
                    .contains(&Query::range("price_end").lte("50").gt("10")),
                "{:?}",
                mode
            );
        }
    }

    #[test]
    fn test_normalize_uses_configured_limits() {
        let builder = builder().with_page_limits(PageLimits::new(100, 25));
        let request = builder
            .normalize(&SearchRequest::simple("mouse").with_size(80).with_page(2))
            .unwrap();
        assert_eq!(request.size, 80);

        let built = builder.build(&request, SearchMode::Exact);
        assert_eq!(built.size, 80);
        assert_eq!(built.from, 80);

        let fallback = builder.normalize(&SearchRequest::simple("mouse")).unwrap();
        assert_eq!(fallback.size, 25);
    }

    #[test]
    fn test_min_price_alone_is_ignored() {
        let mut raw = SearchRequest::simple("mouse");
        raw.min_price = Some("10".to_string());
        let request = normalize(raw);

        let built = builder().build(&request, SearchMode::Exact);
        let query = bool_query(&built.query);
        assert_eq!(query.must, vec![Query::match_phrase("title", "mouse")]);
    }

    #[test]
    fn test_index_selection() {
        let all = normalize(SearchRequest::simple("mouse"));
        assert_eq!(
            builder().target_indices(&all),
            vec!["tbk_tb", "tbk_jd", "tbk_pdd"]
        );

        let single = normalize(SearchRequest::simple("mouse").with_index("tbk_jd"));
        assert_eq!(builder().target_indices(&single), vec!["tbk_jd"]);

        let unknown = normalize(SearchRequest::simple("mouse").with_index("tbk"));
        assert_eq!(builder().target_indices(&unknown).len(), 3);
    }

    #[test]
    fn test_paging_and_min_score() {
        let request = normalize(SearchRequest::simple("mouse").with_page(2).with_size(25));
        let built = builder().with_min_score(2.5).build(&request, SearchMode::Exact);
        assert_eq!(built.from, 25);
        assert_eq!(built.size, 25);
        assert_eq!(built.min_score, 2.5);
    }
}
