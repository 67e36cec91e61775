mod acl;
mod jwt;

pub use acl::AclMiddlewareFactory;
pub use jwt::JwtGateFactory;
