use gloo_net::http::Request;
use js_sys::{Reflect, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::ReadableStreamDefaultReader;

use crate::models::{ChatRequest, ErrorBody, Roadmap, RoadmapRequest};

/// Base URL of the backend API server.
const API_BASE: &str = "http://localhost:3000";

/// Posts `message` to the relay and hands every body chunk to `on_chunk` as
/// soon as it is read. Returns once the body is exhausted.
pub async fn stream_chat(message: &str, mut on_chunk: impl FnMut(&[u8])) -> Result<(), String> {
    let body = ChatRequest { message: message.to_string() };

    let resp = Request::post(&format!("{API_BASE}/api/ai"))
        .json(&body)
        .map_err(|e| format!("Serialize error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return Err(format!("Server error: {}", resp.status()));
    }

    let stream = resp.body().ok_or_else(|| "No reader available".to_string())?;
    let reader: ReadableStreamDefaultReader = stream.get_reader().unchecked_into();

    loop {
        let result = JsFuture::from(reader.read())
            .await
            .map_err(|e| format!("Stream error: {e:?}"))?;

        let done = Reflect::get(&result, &JsValue::from_str("done"))
            .map_err(|e| format!("Stream error: {e:?}"))?
            .as_bool()
            .unwrap_or(true);
        if done {
            break;
        }

        let value = Reflect::get(&result, &JsValue::from_str("value"))
            .map_err(|e| format!("Stream error: {e:?}"))?;
        on_chunk(&Uint8Array::new(&value).to_vec());
    }

    Ok(())
}

/// Asks the backend to lay out a roadmap.
pub async fn generate_roadmap(goal: &str, hours_per_day: u32) -> Result<Roadmap, String> {
    let body = RoadmapRequest { goal: goal.to_string(), hours_per_day };

    let resp = Request::post(&format!("{API_BASE}/api/roadmap"))
        .json(&body)
        .map_err(|e| format!("Serialize error: {e}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !resp.ok() {
        return match resp.json::<ErrorBody>().await {
            Ok(body) => Err(body.error),
            Err(_) => Err(format!("Server error: {}", resp.status())),
        };
    }

    resp.json::<Roadmap>()
        .await
        .map_err(|e| format!("Parse error: {e}"))
}
