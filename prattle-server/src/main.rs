use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, put, web};

use serde::Deserialize;

use prattle_core::error::ChatError;
use prattle_core::io::list_files;
use prattle_core::model::chat_config::ChatConfig;
use prattle_core::model::session::ChatSession;
use prattle_core::model::transition_model::TransitionModel;

/// Struct representing query parameters for the `/v1/reply` endpoint
#[derive(Deserialize)]
struct ReplyParams {
	message: String,
	max_tokens: Option<usize>,
}

#[derive(Deserialize)]
struct TrainQuery {
	corpus: Option<String>,
}

struct SharedData {
	session: ChatSession,
}

/// HTTP GET endpoint `/v1/reply`
///
/// Produces one conversational reply from the shared session based on
/// query parameters. Returns the formatted reply as the response body.
#[get("/v1/reply")]
async fn get_reply(data: web::Data<Mutex<SharedData>>, query: web::Query<ReplyParams>) -> impl Responder {
	let message = query.message.trim();
	if message.is_empty() {
		return HttpResponse::BadRequest().body("Missing or empty message");
	}

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Session lock failed"),
	};

	if let Some(max_tokens) = query.max_tokens {
		if let Err(e) = shared_data.session.set_max_tokens(max_tokens) {
			return HttpResponse::BadRequest().body(e.to_string());
		}
	}

	match shared_data.session.respond(message) {
		Ok(reply) => HttpResponse::Ok().body(reply),
		Err(ChatError::EmptyModel) => {
			HttpResponse::ServiceUnavailable().body("No corpus loaded, PUT /v1/train first")
		}
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/status`
///
/// Reports the vocabulary size of the loaded model and the current
/// context window depth.
#[get("/v1/status")]
async fn get_status(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Session lock failed"),
	};

	HttpResponse::Ok().body(format!(
		"{} distinct words, {} remembered inputs",
		shared_data.session.distinct_words(),
		shared_data.session.context_depth()
	))
}

#[get("/v1/corpora")]
async fn get_corpora() -> impl Responder {
	match list_files("./data", "txt") {
		Ok(files) => HttpResponse::Ok().body(files.join("\n").replace(".txt", "")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora"),
	}
}

/// HTTP PUT endpoint `/v1/train`
///
/// Retrains the shared session from `./data/<name>.txt`, replacing the
/// previous model and context. Merging is not supported.
#[put("/v1/train")]
async fn put_train(data: web::Data<Mutex<SharedData>>, query: web::Query<TrainQuery>) -> impl Responder {
	let name = match &query.corpus {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus name"),
	};

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Session lock failed"),
	};

	let corpus_path = format!("./data/{}.txt", name);
	shared_data.session = ChatSession::from_corpus(&corpus_path, ChatConfig::default());

	match shared_data.session.training_error() {
		None => HttpResponse::Ok().body(format!(
			"Corpus loaded: {} distinct words",
			shared_data.session.distinct_words()
		)),
		Some(error) => HttpResponse::InternalServerError().body(format!("Failed to train: {error}")),
	}
}

/// Main entry point for the server.
///
/// Starts with an empty session, wraps it in a `Mutex` for thread safety,
/// and starts an Actix-web HTTP server; a corpus is loaded on demand
/// through `/v1/train`.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - The session is shared: all callers converse through one context
///   window. Per-caller conversations would need one session each.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let shared_data = SharedData {
		session: ChatSession::new(TransitionModel::new(), ChatConfig::default()),
	};
	let shared_session = web::Data::new(Mutex::new(shared_data));

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_session.clone())
			.service(get_reply)
			.service(get_status)
			.service(get_corpora)
			.service(put_train)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
