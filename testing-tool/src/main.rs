use std::io::{self, Write};

use anyhow::{anyhow, Result};
use colored::*;
use reqwest::{Client, Method, StatusCode};
use serde_json::{json, Value};

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🧽 Lava-car Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    let base_url = ask_base_url()?;
    let api = Api::new(base_url);

    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 💓 Health check");
        println!("2. 🚗 Flujo completo (cliente → servicio → galería → evaluación)");
        println!("3. 📊 Dashboard de hoy");
        println!("4. 🚪 Salir");
        print!("{}", "Selecciona una opción (1-4): ".bright_yellow());
        io::stdout().flush()?;

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;

        let result = match choice.trim() {
            "1" => api.health().await,
            "2" => run_scenario(&api).await,
            "3" => api.dashboard().await,
            "4" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
                continue;
            }
        };

        if let Err(e) = result {
            println!("{} {}", "❌ Falló:".bright_red().bold(), e);
        }
    }

    Ok(())
}

fn ask_base_url() -> Result<String> {
    print!("{}", "URL del servidor [http://localhost:3000]: ".bright_yellow());
    io::stdout().flush()?;
    let mut url = String::new();
    io::stdin().read_line(&mut url)?;
    let url = url.trim().trim_end_matches('/');
    Ok(if url.is_empty() {
        "http://localhost:3000".to_string()
    } else {
        url.to_string()
    })
}

struct Api {
    client: Client,
    base_url: String,
}

impl Api {
    fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn call(&self, method: Method, path: &str, body: Option<Value>) -> Result<(StatusCode, Value)> {
        let url = format!("{}{}", self.base_url, path);
        println!("{} {} {}", "📤".bright_blue(), method, url);

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let value = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        let line = format!("📥 {}", status);
        if status.is_success() {
            println!("{}", line.bright_green());
        } else {
            println!("{}", line.bright_yellow());
        }
        Ok((status, value))
    }

    /// Llamada que debe responder `expected`
    async fn expect(&self, method: Method, path: &str, body: Option<Value>, expected: StatusCode) -> Result<Value> {
        let (status, value) = self.call(method, path, body).await?;
        if status != expected {
            return Err(anyhow!(
                "{} respondió {} (esperado {}): {}",
                path,
                status,
                expected,
                value
            ));
        }
        Ok(value)
    }

    async fn health(&self) -> Result<()> {
        let body = self.expect(Method::GET, "/health", None, StatusCode::OK).await?;
        println!("{}", serde_json::to_string_pretty(&body)?);
        Ok(())
    }

    async fn dashboard(&self) -> Result<()> {
        let summary = self.expect(Method::GET, "/api/dashboard", None, StatusCode::OK).await?;
        let full = self.expect(Method::GET, "/api/dashboard/full", None, StatusCode::OK).await?;
        println!("{}", "📅 AGENDA:".bright_cyan().bold());
        println!("{}", serde_json::to_string_pretty(&summary)?);
        println!("{}", "💰 FATURAMENTO:".bright_cyan().bold());
        println!("{}", serde_json::to_string_pretty(&full)?);
        Ok(())
    }
}

fn id_of(value: &Value) -> Result<i64> {
    value["id"]
        .as_i64()
        .ok_or_else(|| anyhow!("respuesta sin id: {}", value))
}

fn step(title: &str) {
    println!();
    println!("{}", title.bright_cyan().bold());
}

async fn run_scenario(api: &Api) -> Result<()> {
    // Nombre único por corrida: el nombre del cliente es clave natural
    let suffix = run_suffix();
    let name = format!("Ana {}", suffix);

    step("👤 Crear cliente con Onix/ABC1234");
    let customer = api
        .expect(
            Method::POST,
            "/api/customers",
            Some(json!({
                "name": name,
                "phone": "(11) 98765-4321",
                "vehicle_model": "Onix",
                "vehicle_plate": "ABC1234"
            })),
            StatusCode::CREATED,
        )
        .await?;
    let customer_id = id_of(&customer)?;
    let vehicle_id = id_of(&customer["vehicles"][0])?;

    step("📅 Agendar");
    let appointment_body = json!({
        "scheduled_at": format!(
            "2099-01-{:02}T{:02}:{:02}:00-03:00",
            1 + suffix % 28,
            (suffix / 28) % 24,
            (suffix / 672) % 60
        ),
        "customer_id": customer_id,
        "vehicle_id": vehicle_id
    });
    let appointment = api
        .expect(Method::POST, "/api/appointments", Some(appointment_body), StatusCode::CREATED)
        .await?;
    let appointment_id = id_of(&appointment)?;

    step("🧽 Iniciar servicio");
    let service = api
        .expect(
            Method::POST,
            "/api/services",
            Some(json!({ "appointment_id": appointment_id })),
            StatusCode::CREATED,
        )
        .await?;
    let service_id = id_of(&service)?;

    step("✅ Concluir servicio");
    api.expect(
        Method::PUT,
        &format!("/api/services/{}", service_id),
        Some(json!({
            "status": "completed",
            "checklist": { "Lavagem Externa": true, "Aspirador": true },
            "photos": ["https://img.example/onix-1.jpg"],
            "price": "80.00"
        })),
        StatusCode::OK,
    )
    .await?;

    step("🖼️ Asignar galería");
    let assigned = api
        .expect(
            Method::PATCH,
            &format!("/api/services/{}", service_id),
            Some(json!({})),
            StatusCode::OK,
        )
        .await?;
    let gallery_id = assigned["gallery_id"]
        .as_str()
        .ok_or_else(|| anyhow!("servicio sin galería: {}", assigned))?
        .to_string();

    let gallery = api
        .expect(Method::GET, &format!("/api/gallery/{}", gallery_id), None, StatusCode::OK)
        .await?;
    println!("{}", serde_json::to_string_pretty(&gallery)?);

    step("⭐ Evaluar dos veces (la segunda debe ser 409)");
    let rating_path = format!("/api/gallery/{}/rating", gallery_id);
    api.expect(Method::POST, &rating_path, Some(json!({ "stars": 5 })), StatusCode::CREATED)
        .await?;
    api.expect(Method::POST, &rating_path, Some(json!({ "stars": 4 })), StatusCode::CONFLICT)
        .await?;

    step("💬 Mensaje de WhatsApp");
    let share = api
        .expect(
            Method::POST,
            &format!("/api/services/{}/share", service_id),
            None,
            StatusCode::OK,
        )
        .await?;
    println!("{}", share["whatsapp_url"].as_str().unwrap_or_default());

    step("🗑️ Limpiar agendamiento");
    api.expect(
        Method::DELETE,
        &format!("/api/appointments/{}", appointment_id),
        None,
        StatusCode::NO_CONTENT,
    )
    .await?;

    println!();
    println!("{}", "🎉 Flujo completo OK".bright_green().bold());
    Ok(())
}

/// Sufijo numérico a partir del reloj del sistema
fn run_suffix() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() % 100_000)
        .unwrap_or(0)
}
