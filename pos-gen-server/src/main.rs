use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use log::{error, info};
use serde::{Deserialize, Serialize};

use pos_gen_core::config::Config;
use pos_gen_core::corpus::Corpus;
use pos_gen_core::errors::GenError;
use pos_gen_core::model::generation_input::{GenerationInput, StartSeed};
use pos_gen_core::model::generator::Generator;
use pos_gen_core::text::RuleTagger;

/// Query parameters of the `/v1/generate` endpoint
#[derive(Deserialize, Default)]
struct GenerateParams {
	max_chars: Option<usize>,
	tries: Option<usize>,
	max_steps: Option<usize>,
	start: Option<String>, // start phrase, matched from a line start unless `loose`
	loose: Option<bool>,
}

#[derive(Serialize)]
struct Stats {
	state_size: usize,
	states: usize,
	lines: usize,
}

struct SharedData {
	generator: Generator,
	defaults: GenerationInput,
}

impl GenerateParams {
	/// Applies the query on top of the configured defaults.
	fn generation_input(&self, defaults: &GenerationInput) -> GenerationInput {
		let start_seed = match &self.start {
			None => StartSeed::Random,
			Some(s) if s.trim().is_empty() => StartSeed::Random,
			Some(s) if self.loose.unwrap_or(false) => StartSeed::Loose(s.clone()),
			Some(s) => StartSeed::Custom(s.clone()),
		};

		GenerationInput {
			max_chars: self.max_chars.unwrap_or(defaults.max_chars),
			tries: self.tries.unwrap_or(defaults.tries),
			max_steps: self.max_steps.unwrap_or(defaults.max_steps),
			start_seed,
			originality: defaults.originality,
		}
	}
}

/// Maps a generation error to an HTTP response.
///
/// An exhausted retry budget is temporary (503); bad parameters are the
/// client's fault (400).
fn error_response(e: &GenError) -> HttpResponse {
	match e {
		GenError::GenerationFailed { .. } => HttpResponse::ServiceUnavailable().body(e.to_string()),
		GenError::InvalidParameter(_) | GenError::UnknownStart(_) => HttpResponse::BadRequest().body(e.to_string()),
		_ => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates a filtered sentence based on query parameters.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<SharedData>, query: web::Query<GenerateParams>) -> impl Responder {
	let input = query.generation_input(&data.defaults);

	match data.generator.generate(&input) {
		Ok(result) => HttpResponse::Ok().body(result),
		Err(e) => error_response(&e),
	}
}

/// HTTP GET endpoint `/v1/stats`
#[get("/v1/stats")]
async fn get_stats(data: web::Data<SharedData>) -> impl Responder {
	let model = data.generator.model();
	HttpResponse::Ok().json(Stats { state_size: model.state_size(), states: model.len(), lines: model.lines() })
}

/// Loads the configuration, the corpus and the tagger, and builds the generator.
fn load_shared_data(config_path: Option<PathBuf>) -> Result<SharedData, GenError> {
	let config = match config_path {
		Some(path) => Config::load(path)?,
		None => Config::default(),
	};

	let corpus = if config.corpus.json {
		Corpus::from_json_file(&config.corpus.path)?
	} else {
		Corpus::from_text_file(&config.corpus.path)?
	};

	let mut tagger = RuleTagger::default();
	if let Some(lexicon) = &config.corpus.lexicon {
		tagger = tagger.with_lexicon_file(lexicon)?;
	}

	let generator = Generator::build(&corpus, tagger, &config.generation.build_options())?;
	let defaults = config.generation.generation_input()?;
	Ok(SharedData { generator, defaults })
}

/// Main entry point for the server.
///
/// Builds the generator once, shares it read-only between workers
/// and starts an Actix-web HTTP server.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - The configuration file path is the first argument, if any.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let shared_data = match load_shared_data(std::env::args_os().nth(1).map(PathBuf::from)) {
		Ok(data) => web::Data::new(data),
		Err(e) => {
			error!("failed to build the generator: {e}");
			return Err(std::io::Error::other(e));
		}
	};

	info!("listening on 127.0.0.1:5000");
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_data.clone())
			.service(get_generated)
			.service(get_stats)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::http::StatusCode;
	use actix_web::test;
	use pos_gen_core::model::chain::BuildOptions;

	fn shared_data(lines: &[&str]) -> web::Data<SharedData> {
		let corpus = Corpus::from_lines(lines.iter().copied());
		let generator = Generator::build(&corpus, RuleTagger::default(), &BuildOptions::default()).unwrap();
		web::Data::new(SharedData { generator, defaults: GenerationInput::default() })
	}

	#[actix_web::test]
	async fn params_override_defaults() {
		let params = GenerateParams { max_chars: Some(50), start: Some("the".to_owned()), ..GenerateParams::default() };
		let input = params.generation_input(&GenerationInput::default());

		assert_eq!(input.max_chars, 50);
		assert_eq!(input.tries, 10);
		assert_eq!(input.start_seed, StartSeed::Custom("the".to_owned()));
	}

	#[actix_web::test]
	async fn generate_returns_text() {
		let app = test::init_service(
			App::new().app_data(shared_data(&["the cat sat on the mat"])).service(get_generated),
		)
		.await;

		let req = test::TestRequest::get().uri("/v1/generate").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(body, "the cat sat on the mat");
	}

	#[actix_web::test]
	async fn exhausted_budget_is_unavailable() {
		let app = test::init_service(App::new().app_data(shared_data(&["@bob"])).service(get_generated)).await;

		let req = test::TestRequest::get().uri("/v1/generate?tries=3").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
	}

	#[actix_web::test]
	async fn bad_start_is_a_client_error() {
		let app = test::init_service(
			App::new().app_data(shared_data(&["the cat sat on the mat"])).service(get_generated),
		)
		.await;

		let req = test::TestRequest::get().uri("/v1/generate?start=one%20two%20three").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn stats_describe_the_model() {
		let app = test::init_service(App::new().app_data(shared_data(&["a b", "c d"])).service(get_stats)).await;

		let req = test::TestRequest::get().uri("/v1/stats").to_request();
		let stats: serde_json::Value = test::call_and_read_body_json(&app, req).await;
		assert_eq!(stats["state_size"], 2);
		assert_eq!(stats["lines"], 2);
	}
}
