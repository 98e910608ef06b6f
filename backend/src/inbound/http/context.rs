//! Extractor building a [`RequestContext`] for each request.
//!
//! The deadline comes from [`HttpState::request_timeout`]. Handlers mounted
//! without state get a background context.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};

use crate::domain::RequestContext;
use crate::inbound::http::state::HttpState;

impl FromRequest for RequestContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let timeout = req
            .app_data::<web::Data<HttpState>>()
            .and_then(|state| state.request_timeout());
        let ctx = RequestContext::background();
        ready(Ok(match timeout {
            Some(timeout) => ctx.with_timeout(timeout),
            None => ctx,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::domain::ports::MockUserRegistry;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    fn state(timeout: Option<Duration>) -> web::Data<HttpState> {
        web::Data::new(
            HttpState::new(Arc::new(MockUserRegistry::new())).with_request_timeout(timeout),
        )
    }

    async fn extract(req: HttpRequest) -> RequestContext {
        RequestContext::extract(&req)
            .await
            .expect("extractor is infallible")
    }

    #[rstest]
    #[actix_web::test]
    async fn no_state_yields_background_context() {
        let ctx = extract(TestRequest::default().to_http_request()).await;
        assert!(ctx.deadline().is_none());
        assert!(!ctx.is_cancelled());
    }

    #[rstest]
    #[case(None, false)]
    #[case(Some(Duration::from_secs(30)), true)]
    #[actix_web::test]
    async fn deadline_follows_configured_timeout(
        #[case] timeout: Option<Duration>,
        #[case] has_deadline: bool,
    ) {
        let req = TestRequest::default()
            .app_data(state(timeout))
            .to_http_request();
        let ctx = extract(req).await;
        assert_eq!(ctx.deadline().is_some(), has_deadline);
        assert!(!ctx.is_cancelled());
    }
}
