//! The bearer-token gate for the `/api` scope.
//!
//! If an `Authorization: Bearer` header is present, the token is validated and the claims are
//! parked in the request extensions, where the [`crate::auth::Identity`] extractor and the ACL
//! middleware pick them up. An *invalid* token is rejected outright; an *absent* one is let
//! through anonymously, because public routes (search, product detail, FAQ reads) live under
//! the same scope and simply never extract an identity.

use std::{pin::Pin, rc::Rc};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
    HttpMessage,
};
use futures::{
    future::{ok, Ready},
    Future,
};

use crate::{auth::TokenIssuer, errors::ServerError};

pub struct JwtGateFactory {
    issuer: Rc<TokenIssuer>,
}

impl JwtGateFactory {
    pub fn new(issuer: TokenIssuer) -> Self {
        JwtGateFactory { issuer: Rc::new(issuer) }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtGateFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = JwtGateService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(JwtGateService { issuer: Rc::clone(&self.issuer), service: Rc::new(service) })
    }
}

pub struct JwtGateService<S> {
    issuer: Rc<TokenIssuer>,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let issuer = Rc::clone(&self.issuer);
        Box::pin(async move {
            let token = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "))
                .map(|s| s.to_string());
            if let Some(token) = token {
                match issuer.decode_access_token(&token) {
                    Ok(claims) => {
                        req.extensions_mut().insert(claims);
                    },
                    Err(e) => {
                        log::debug!("🔐️ Rejecting request with invalid bearer token. {e}");
                        return Err(ServerError::AuthenticationError(e).into());
                    },
                }
            }
            service.call(req).await
        })
    }
}
