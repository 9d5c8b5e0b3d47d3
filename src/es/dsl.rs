//! The subset of the Elasticsearch query DSL used by the query builder

use serde_json::{json, Map, Value};

/// A query clause
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Bool(BoolQuery),
    /// Analyzed full-text match
    Match { field: String, text: String },
    /// All terms must appear, in order
    MatchPhrase { field: String, text: String },
    /// Bounds are passed through as strings; the engine coerces them
    Range {
        field: String,
        gt: Option<String>,
        lte: Option<String>,
    },
}

impl Query {
    pub fn match_query(field: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Match {
            field: field.into(),
            text: text.into(),
        }
    }

    pub fn match_phrase(field: impl Into<String>, text: impl Into<String>) -> Self {
        Self::MatchPhrase {
            field: field.into(),
            text: text.into(),
        }
    }

    pub fn range(field: impl Into<String>) -> Self {
        Self::Range {
            field: field.into(),
            gt: None,
            lte: None,
        }
    }

    /// Set the exclusive lower bound of a range query
    pub fn gt(mut self, value: impl Into<String>) -> Self {
        if let Self::Range { ref mut gt, .. } = self {
            *gt = Some(value.into());
        }
        self
    }

    /// Set the inclusive upper bound of a range query
    pub fn lte(mut self, value: impl Into<String>) -> Self {
        if let Self::Range { ref mut lte, .. } = self {
            *lte = Some(value.into());
        }
        self
    }

    /// Render as request JSON
    pub fn to_json(&self) -> Value {
        match self {
            Self::Bool(b) => b.to_json(),
            Self::Match { field, text } => {
                keyed("match", keyed(field, json!({ "query": text })))
            }
            Self::MatchPhrase { field, text } => {
                keyed("match_phrase", keyed(field, json!({ "query": text })))
            }
            Self::Range { field, gt, lte } => {
                let mut bounds = Map::new();
                if let Some(gt) = gt {
                    bounds.insert("gt".to_string(), Value::String(gt.clone()));
                }
                if let Some(lte) = lte {
                    bounds.insert("lte".to_string(), Value::String(lte.clone()));
                }
                keyed("range", keyed(field, Value::Object(bounds)))
            }
        }
    }
}

/// Boolean combination of clauses
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolQuery {
    pub must: Vec<Query>,
    pub should: Vec<Query>,
    pub minimum_should_match: Option<u32>,
}

impl BoolQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn must(mut self, query: Query) -> Self {
        self.must.push(query);
        self
    }

    pub fn should(mut self, query: Query) -> Self {
        self.should.push(query);
        self
    }

    pub fn minimum_should_match(mut self, n: u32) -> Self {
        self.minimum_should_match = Some(n);
        self
    }

    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        if !self.must.is_empty() {
            body.insert(
                "must".to_string(),
                Value::Array(self.must.iter().map(Query::to_json).collect()),
            );
        }
        if !self.should.is_empty() {
            body.insert(
                "should".to_string(),
                Value::Array(self.should.iter().map(Query::to_json).collect()),
            );
        }
        if let Some(n) = self.minimum_should_match {
            body.insert("minimum_should_match".to_string(), json!(n));
        }
        keyed("bool", Value::Object(body))
    }
}

impl From<BoolQuery> for Query {
    fn from(b: BoolQuery) -> Self {
        Query::Bool(b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A sort criterion
#[derive(Debug, Clone, PartialEq)]
pub enum Sort {
    Field {
        field: String,
        direction: SortDirection,
    },
    /// Relevance, best first
    Score,
}

impl Sort {
    pub fn field(field: impl Into<String>, direction: SortDirection) -> Self {
        Self::Field {
            field: field.into(),
            direction,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Field { field, direction } => {
                keyed(field, json!({ "order": direction.as_str() }))
            }
            Self::Score => json!({ "_score": { "order": "desc" } }),
        }
    }
}

/// A complete `_search` call: target indices plus request body
#[derive(Debug, Clone, PartialEq)]
pub struct EsSearchRequest {
    pub indices: Vec<String>,
    pub query: Query,
    pub min_score: f64,
    pub sort: Vec<Sort>,
    /// Offset of the first hit
    pub from: u64,
    pub size: u32,
}

impl EsSearchRequest {
    /// Request body for `POST /{indices}/_search`
    pub fn body(&self) -> Value {
        json!({
            "query": self.query.to_json(),
            "min_score": self.min_score,
            "sort": self.sort.iter().map(Sort::to_json).collect::<Vec<_>>(),
            "from": self.from,
            "size": self.size,
            "track_total_hits": true,
        })
    }

    /// Comma-joined index list used as the first path segment
    pub fn index_path(&self) -> String {
        self.indices.join(",")
    }
}

fn keyed(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_query_json() {
        let query: Query = BoolQuery::new()
            .must(Query::match_phrase("title", "red"))
            .must(Query::range("price_end").gt("10").lte("99.5"))
            .into();

        assert_eq!(
            query.to_json(),
            json!({
                "bool": {
                    "must": [
                        { "match_phrase": { "title": { "query": "red" } } },
                        { "range": { "price_end": { "gt": "10", "lte": "99.5" } } }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_should_with_minimum() {
        let query = BoolQuery::new()
            .should(Query::match_query("title", "red shoes"))
            .minimum_should_match(1)
            .to_json();

        assert_eq!(query["bool"]["minimum_should_match"], json!(1));
        assert_eq!(
            query["bool"]["should"][0]["match"]["title"]["query"],
            json!("red shoes")
        );
        assert!(query["bool"].get("must").is_none());
    }

    #[test]
    fn test_range_without_lower_bound() {
        let query = Query::range("price_end").lte("50").to_json();
        assert_eq!(query, json!({ "range": { "price_end": { "lte": "50" } } }));
    }

    #[test]
    fn test_request_body() {
        let request = EsSearchRequest {
            indices: vec!["a".to_string(), "b".to_string()],
            query: Query::match_query("title", "x"),
            min_score: 1.0,
            sort: vec![Sort::field("total_sale", SortDirection::Desc), Sort::Score],
            from: 20,
            size: 10,
        };

        let body = request.body();
        assert_eq!(request.index_path(), "a,b");
        assert_eq!(body["from"], json!(20));
        assert_eq!(body["size"], json!(10));
        assert_eq!(body["min_score"], json!(1.0));
        assert_eq!(
            body["sort"],
            json!([
                { "total_sale": { "order": "desc" } },
                { "_score": { "order": "desc" } }
            ])
        );
    }
}
