use chrono::{Duration as ChronoDuration, Utc};
use colored::*;
use governor::{Quota, RateLimiter};
use hdrhistogram::Histogram;
use reqwest::Client;
use serde_json::{json, Value};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use uuid::Uuid;

const DURATION_SECS: u64 = 20;
const BASE_URL: &str = "http://localhost:3000";

struct Target {
    name: &'static str,
    method: &'static str,
    url: String,
    body: Option<serde_json::Value>,
}

#[tokio::main]
async fn main() {
    println!("{}", "🚀 Starting Benchmark Suite".bold().green());
    println!("Target URL: {}", BASE_URL);

    let client = Client::builder()
        .pool_max_idle_per_host(1000)
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap();

    if client.get(format!("{}/health", BASE_URL)).send().await.is_err() {
        eprintln!("{}", "❌ Server is NOT reachable at localhost:3000. Please start it first.".red().bold());
        return;
    }

    println!("\n{}", "⚙️  Setting up benchmark data...".yellow());
    let (club_id, club_email, club_password) = setup_club(&client).await;
    let room_id = setup_classroom(&client).await;
    let event_id = setup_event(&client, &room_id, &club_id).await;

    println!("{}", "✅ Data created successfully.".green());
    println!("   Club ID:  {}", club_id);
    println!("   Room ID:  {}", room_id);
    println!("   Event ID: {}", event_id);

    let targets = vec![
        Target {
            name: "Health Check (Public)",
            method: "GET",
            url: format!("{}/health", BASE_URL),
            body: None,
        },
        Target {
            name: "List Classrooms (Read)",
            method: "GET",
            url: format!("{}/api/v1/classrooms", BASE_URL),
            body: None,
        },
        Target {
            name: "Get Event Details (Read)",
            method: "GET",
            url: format!("{}/api/v1/events/{}", BASE_URL, event_id),
            body: None,
        },
        Target {
            name: "List Classroom Requests (Joined Read)",
            method: "GET",
            url: format!("{}/api/v1/classroom-requests", BASE_URL),
            body: None,
        },
        Target {
            name: "Login Flow (Crypto Intensive)",
            method: "POST",
            url: format!("{}/api/v1/auth/login", BASE_URL),
            body: Some(json!({
                "email": club_email,
                "password": club_password
            })),
        },
    ];

    let rps_stages = vec![10, 50, 200, 1000];

    for target in targets {
        println!("\n{}", "=".repeat(60));
        println!("Benchmarking Endpoint: {}", target.name.cyan().bold());
        println!("URL: {}", target.url);
        println!("{}", "=".repeat(60));

        println!("{:<10} | {:<15} | {:<15} | {:<15}", "RPS", "Mean (ms)", "P99 (ms)", "Success Rate");
        println!("{:-<10}-+-{:-<15}-+-{:-<15}-+-{:-<15}", "", "", "", "");

        for &rps in &rps_stages {
            run_stage(&client, &target, rps).await;
        }
    }
}

async fn setup_club(client: &Client) -> (String, String, String) {
    let tag = Uuid::new_v4().simple().to_string();
    let email = format!("bench-club-{}@example.com", &tag[..8]);
    let phone: String = tag.chars().filter(|c| c.is_ascii_digit()).take(8).collect::<String>();
    let phone = format!("{:0<8}", phone);

    let res = client.post(format!("{}/api/v1/users", BASE_URL))
        .json(&json!({
            "full_name": "Benchmark Club",
            "phone": phone,
            "email": email,
            "role": "club"
        }))
        .send()
        .await
        .expect("Failed to send user create request");

    if !res.status().is_success() {
        panic!("Failed to create club user: status {}", res.status());
    }

    let body: Value = res.json().await.expect("Failed to parse user response");
    let id = body["id"].as_str().expect("No id").to_string();
    let password = body["initial_password"].as_str().expect("No initial_password").to_string();
    (id, email, password)
}

async fn setup_classroom(client: &Client) -> String {
    let res = client.post(format!("{}/api/v1/classrooms", BASE_URL))
        .json(&json!({
            "num": format!("B-{}", Uuid::new_v4()),
            "capacity": 100
        }))
        .send()
        .await
        .expect("Failed to create classroom");

    if !res.status().is_success() {
        panic!("Failed to create classroom: status {}", res.status());
    }

    let body: Value = res.json().await.expect("Failed to parse classroom response");
    body["id"].as_str().expect("No id").to_string()
}

async fn setup_event(client: &Client, room_id: &str, organizer_id: &str) -> String {
    let res = client.post(format!("{}/api/v1/events", BASE_URL))
        .json(&json!({
            "name": "Benchmark Gala",
            "start_time": (Utc::now() + ChronoDuration::days(7)).to_rfc3339(),
            "end_time": (Utc::now() + ChronoDuration::days(7) + ChronoDuration::hours(2)).to_rfc3339(),
            "room_id": room_id,
            "organizer_id": organizer_id,
            "description": "Load testing",
            "status": "confirmed"
        }))
        .send()
        .await
        .expect("Failed to create event");

    if !res.status().is_success() {
        let status = res.status();
        let txt = res.text().await.unwrap_or_default();
        panic!("Failed to create event data. Status: {}. Body: {}", status, txt);
    }

    let body: Value = res.json().await.expect("Failed to parse event response");
    body["id"].as_str().expect("No id").to_string()
}

async fn run_stage(client: &Client, target: &Target, rps: u32) {
    let limiter = Arc::new(RateLimiter::direct(
        Quota::per_second(NonZeroU32::new(rps).unwrap())
    ));

    let (tx, mut rx) = mpsc::channel(50000);
    let start_time = Instant::now();
    let duration = Duration::from_secs(DURATION_SECS);

    loop {
        if start_time.elapsed() > duration {
            break;
        }

        if limiter.check().is_ok() {
            let client = client.clone();
            let url = target.url.clone();
            let body = target.body.clone();
            let method = target.method;
            let tx = tx.clone();

            tokio::spawn(async move {
                let req_start = Instant::now();
                let res = match method {
                    "GET" => client.get(&url).send().await,
                    "POST" => {
                        let mut req = client.post(&url);
                        if let Some(b) = body {
                            req = req.json(&b);
                        }
                        req.send().await
                    },
                    _ => client.get(&url).send().await,
                };
                let latency = req_start.elapsed();

                let success = match res {
                    Ok(r) => r.status().is_success(),
                    Err(_) => false,
                };

                let _ = tx.send((latency, success)).await;
            });
        } else {
            tokio::task::yield_now().await;
        }
    }

    drop(tx);

    let mut histogram = Histogram::<u64>::new(3).unwrap();
    let mut successes = 0;
    let mut total = 0;

    while let Some((latency, success)) = rx.recv().await {
        total += 1;
        if success { successes += 1; }
        histogram.record(latency.as_micros() as u64).unwrap();
    }

    let mean_ms = histogram.mean() / 1000.0;
    let p99_ms = histogram.value_at_quantile(0.99) as f64 / 1000.0;
    let success_rate = if total > 0 { (successes as f64 / total as f64) * 100.0 } else { 0.0 };

    println!(
        "{:<10} | {:<15.2} | {:<15.2} | {:<14.1}%",
        rps,
        mean_ms,
        p99_ms,
        success_rate
    );

    tokio::time::sleep(Duration::from_millis(500)).await;
}
