use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};

use crate::error::Res;

pub struct Success;
impl Success {
    pub fn created<T: Serialize>(body: T) -> Res<impl Responder> {
        Result::Ok(HttpResponse::Created().json(body))
    }
    pub fn ok<T: Serialize>(body: T) -> Res<impl Responder> {
        Result::Ok(HttpResponse::Ok().json(body))
    }
}

/// Common `?page=&limit=` query parameters.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    /// Clamped (offset, limit) pair; page starts at 1, limit capped at 100.
    pub fn bounds(&self) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(10).clamp(1, 100);
        ((page - 1) * limit, limit)
    }

    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl Pagination {
    pub fn new(query: &web::Query<PageQuery>, total: i64) -> Self {
        let (_, limit) = query.bounds();
        Pagination {
            page: query.page(),
            limit,
            total,
            pages: (total + limit - 1) / limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_defaults_and_clamps() {
        let q = PageQuery {
            page: None,
            limit: None,
        };
        assert_eq!(q.bounds(), (0, 10));

        let q = PageQuery {
            page: Some(3),
            limit: Some(20),
        };
        assert_eq!(q.bounds(), (40, 20));

        let q = PageQuery {
            page: Some(0),
            limit: Some(1000),
        };
        assert_eq!(q.bounds(), (0, 100));
    }
}
