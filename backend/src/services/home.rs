use actix_web::{HttpResponse, Responder};

pub(crate) async fn process() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Bienvenue sur l'API sécurisée du quiz ✨")
}
