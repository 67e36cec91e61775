use std::convert::Infallible;

use actix_web::{web, HttpResponse, Responder};
use bytes::Bytes;
use futures::stream;
use tokio::sync::broadcast::error::RecvError;

use crate::chat::{ChatMessage, ChatRelay};

/// Full history replay, oldest first. What a freshly-connected client sees.
pub async fn chat_history(relay: web::Data<ChatRelay>) -> impl Responder {
    HttpResponse::Ok().json(relay.history())
}

/// Append a message, broadcast it, and schedule the canned auto-response.
pub async fn chat_send(body: web::Json<ChatMessage>, relay: web::Data<ChatRelay>) -> impl Responder {
    let relay = relay.into_inner();
    relay.send_with_auto_reply(body.into_inner());
    HttpResponse::Accepted().finish()
}

/// Follow the broadcast as a server-sent event stream. Delivery stops at disconnect; clients
/// resync by re-fetching the history.
pub async fn chat_stream(relay: web::Data<ChatRelay>) -> impl Responder {
    let rx = relay.subscribe();
    let stream = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(message) => {
                    let data = serde_json::to_string(&message).unwrap_or_default();
                    return Some((Ok::<_, Infallible>(Bytes::from(format!("data: {data}\n\n"))), rx));
                },
                // A lagged consumer just skips ahead; there is no delivery guarantee to keep.
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => return None,
            }
        }
    });
    HttpResponse::Ok().content_type("text/event-stream").streaming(stream)
}
