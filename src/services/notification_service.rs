//! Mensaje de entrega del servicio (WhatsApp)
//!
//! Arma el texto con resumen del checklist, valor y link de la galería, y el
//! deep link `wa.me` con el teléfono en formato internacional.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::service::{Checklist, DEFAULT_CHECKLIST_ITEMS};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::digits_only;

/// Código de país agregado cuando el teléfono no lo trae
const COUNTRY_CODE: &str = "55";

/// Datos necesarios para componer el mensaje
#[derive(Debug, Clone)]
pub struct ShareInput<'a> {
    pub shop_name: &'a str,
    pub customer_name: &'a str,
    pub phone: Option<&'a str>,
    pub checklist: &'a Checklist,
    pub additional_services: Option<&'a str>,
    pub price: Option<Decimal>,
    pub gallery_url: String,
}

/// Mensaje listo para abrir en el canal de mensajería
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareMessage {
    pub phone: String,
    pub message: String,
    pub whatsapp_url: String,
}

/// URL pública de la galería
pub fn gallery_url(base_url: &str, gallery_id: &str) -> String {
    format!("{}/galeria/{}", base_url.trim_end_matches('/'), gallery_id)
}

/// Teléfono solo con dígitos y con código de país
pub fn international_phone(phone: &str) -> Option<String> {
    let digits = digits_only(phone);
    if digits.is_empty() {
        return None;
    }
    if digits.starts_with(COUNTRY_CODE) {
        Some(digits)
    } else {
        Some(format!("{}{}", COUNTRY_CODE, digits))
    }
}

/// Formato monetario brasileño: `R$ 1.234,56`
pub fn format_brl(value: Decimal) -> String {
    let text = format!("{:.2}", value.round_dp(2).abs());
    let (integer, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::new();
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value.is_sign_negative() && !value.is_zero() { "-" } else { "" };
    format!("{}R$ {},{}", sign, grouped, cents)
}

/// Tareas realizadas: primero las del checklist estándar en su orden, luego
/// las demás en orden alfabético
pub fn checked_items(checklist: &Checklist) -> Vec<&str> {
    let defaults = DEFAULT_CHECKLIST_ITEMS
        .iter()
        .copied()
        .filter(|item| checklist.get(*item).copied().unwrap_or(false));
    let extras = checklist
        .iter()
        .filter(|(item, done)| **done && !DEFAULT_CHECKLIST_ITEMS.contains(&item.as_str()))
        .map(|(item, _)| item.as_str());
    defaults.chain(extras).collect()
}

pub fn compose_share_message(input: &ShareInput<'_>) -> AppResult<ShareMessage> {
    let phone = input
        .phone
        .and_then(international_phone)
        .ok_or_else(|| {
            AppError::Validation(
                "Este cliente não possui um número de telefone cadastrado.".to_string(),
            )
        })?;

    let first_name = input
        .customer_name
        .split_whitespace()
        .next()
        .unwrap_or(input.customer_name);

    let done = checked_items(input.checklist)
        .iter()
        .map(|item| format!("✅ {}", item))
        .collect::<Vec<_>>()
        .join("\n");

    let additional = match input.additional_services.map(str::trim) {
        Some(text) if !text.is_empty() => format!("*Serviços Adicionais:*\n{}\n\n", text),
        _ => String::new(),
    };

    let total = input
        .price
        .map(format_brl)
        .unwrap_or_else(|| "Valor a combinar".to_string());

    let message = format!(
        "Olá {}! 👋\n\nSeu serviço na {} foi finalizado com sucesso!\n\n*Resumo do Serviço:*\n{}\n\n{}*Valor Total:* {}\n\nVeja as fotos do seu veículo e, se puder, deixe sua avaliação:\n{}\n\nAgradecemos a preferência! 😊",
        first_name, input.shop_name, done, additional, total, input.gallery_url
    );

    let whatsapp_url = format!(
        "https://wa.me/{}?text={}",
        phone,
        urlencoding::encode(&message)
    );

    Ok(ShareMessage {
        phone,
        message,
        whatsapp_url,
    })
}
