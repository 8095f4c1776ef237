use actix_web::{web, HttpResponse, Responder};
use log::info;

use crate::models::{AppState, MoveRequest, NewGameRequest};

/// HTTP handler for the index page
pub async fn index() -> impl Responder {
    HttpResponse::Ok().body("Chess sync server")
}

/// Start a new game for the requested side
pub async fn new_game(
    app_state: web::Data<AppState>,
    request: web::Json<NewGameRequest>,
) -> impl Responder {
    info!("New game requested: {:?}", request);
    let response = app_state.game().new_game(&request);
    HttpResponse::Ok().json(response)
}

/// Validate the human's move and answer with the reply
pub async fn submit_move(
    app_state: web::Data<AppState>,
    request: web::Json<MoveRequest>,
) -> impl Responder {
    info!("Move received: {}", request.uci);
    let response = app_state.game().make_move(&request);
    HttpResponse::Ok().json(response)
}

/// Resign the current game
pub async fn resign(app_state: web::Data<AppState>) -> impl Responder {
    let response = app_state.game().resign();
    HttpResponse::Ok().json(response)
}

/// Configure the HTTP routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(index)))
        .service(web::resource("/new").route(web::post().to(new_game)))
        .service(web::resource("/move").route(web::post().to(submit_move)))
        .service(web::resource("/resign").route(web::post().to(resign)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authority::{ArbiterGame, ScriptedOpponent};
    use crate::models::{MoveResponse, NewGameResponse, ResignResponse};
    use actix_web::{test, App};

    fn state(moves: &[&str]) -> web::Data<AppState> {
        let opponent = ScriptedOpponent::new(moves).unwrap();
        web::Data::new(AppState::new(ArbiterGame::new(Box::new(opponent))))
    }

    #[actix_rt::test]
    async fn test_new_move_resign_endpoints() {
        let app = test::init_service(
            App::new()
                .app_data(state(&["e7e5"]))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/new")
            .set_json(NewGameRequest {
                color: "w".to_string(),
            })
            .to_request();
        let created: NewGameResponse = test::call_and_read_body_json(&app, req).await;
        assert!(created.ok);

        let req = test::TestRequest::post()
            .uri("/move")
            .set_json(MoveRequest {
                uci: "e2e4".to_string(),
            })
            .to_request();
        let moved: MoveResponse = test::call_and_read_body_json(&app, req).await;
        assert!(moved.ok);
        assert_eq!(moved.bot_san.as_deref(), Some("e5"));

        let req = test::TestRequest::post()
            .uri("/move")
            .set_json(MoveRequest {
                uci: "e4e6".to_string(),
            })
            .to_request();
        let refused: MoveResponse = test::call_and_read_body_json(&app, req).await;
        assert!(!refused.ok);
        assert!(refused.error.is_some());

        let req = test::TestRequest::post().uri("/resign").to_request();
        let resigned: ResignResponse = test::call_and_read_body_json(&app, req).await;
        assert!(resigned.ok);
        assert_eq!(resigned.result.as_deref(), Some("0-1"));
    }
}
