use std::error::Error;
use std::process::ExitCode;

use auth_token::config::JwtConfig;
use auth_token::{Claims, TokenService, TokenType, ValidationOptions};
use chrono::{Duration, Utc};
use dotenv::dotenv;
use env_logger::Env;
use log::{debug, error, info};
use uuid::Uuid;

const USAGE: &str = "usage: auth_token issue <subject> [ttl-hours] | auth_token verify <token>";

fn main() -> ExitCode {
    load_env_file();
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<String, Box<dyn Error>> {
    match args {
        [command, subject] if command == "issue" => {
            issue(subject, ttl_from_hours(JwtConfig::expiration_hours())?)
        }
        [command, subject, ttl] if command == "issue" => {
            let hours = ttl
                .parse::<i64>()
                .map_err(|e| format!("invalid ttl-hours '{}': {}", ttl, e))?;
            issue(subject, ttl_from_hours(hours)?)
        }
        [command, token] if command == "verify" => verify(token),
        _ => Err(USAGE.into()),
    }
}

fn ttl_from_hours(hours: i64) -> Result<Duration, String> {
    Duration::try_hours(hours).ok_or_else(|| format!("invalid ttl-hours '{}': out of range", hours))
}

fn issue(subject: &str, ttl: Duration) -> Result<String, Box<dyn Error>> {
    let algorithm = JwtConfig::algorithm()?;
    let key = JwtConfig::signing_key()?;

    let mut claims = Claims::issued_now(Utc::now(), ttl)
        .with_subject(subject)
        .with_id(Uuid::new_v4().to_string())
        .with_type(TokenType::Access);
    if let Some(issuer) = JwtConfig::issuer() {
        claims = claims.with_issuer(issuer);
    }
    if let Some(audience) = JwtConfig::audience() {
        claims = claims.with_audience(audience);
    }

    let grant = TokenService::instance().issue_grant(&claims, None, &key, Some(algorithm))?;
    debug!("issued {} token for '{}'", algorithm, subject);
    Ok(serde_json::to_string_pretty(&grant)?)
}

fn verify(token: &str) -> Result<String, Box<dyn Error>> {
    let key = JwtConfig::verifying_key()?;
    let data = TokenService::instance().validate_token(
        token,
        &key,
        Utc::now(),
        &ValidationOptions::from_env(),
    )?;
    Ok(serde_json::to_string_pretty(data.claims())?)
}

fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => debug!(".env.dev 파일 없음: {}", e),
        },
        _ => {
            dotenv().ok();
        }
    }
}

fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
}
