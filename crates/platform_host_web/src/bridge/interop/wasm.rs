use js_sys::{Array, Promise, Uint8Array};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use super::*;

#[wasm_bindgen(inline_js = r#"
const DB_NAME = 'HiddenCatchDB';
const DB_VERSION = 1;
const IMAGES_STORE = 'images';

function fail(message) {
  throw new Error(message);
}

function requestToPromise(req) {
  return new Promise((resolve, reject) => {
    req.onsuccess = () => resolve(req.result);
    req.onerror = () => reject(req.error || new Error('IndexedDB request failed'));
  });
}

function txDone(tx) {
  return new Promise((resolve, reject) => {
    tx.oncomplete = () => resolve();
    tx.onabort = () => reject(tx.error || new Error('IndexedDB transaction aborted'));
    tx.onerror = () => reject(tx.error || new Error('IndexedDB transaction error'));
  });
}

async function openDb() {
  if (typeof indexedDB === 'undefined') {
    fail('IndexedDB is unavailable in this browser context');
  }
  return await new Promise((resolve, reject) => {
    const req = indexedDB.open(DB_NAME, DB_VERSION);
    req.onupgradeneeded = () => {
      const db = req.result;
      if (!db.objectStoreNames.contains(IMAGES_STORE)) {
        db.createObjectStore(IMAGES_STORE, { keyPath: 'id' });
      }
    };
    req.onsuccess = () => resolve(req.result);
    req.onerror = () => reject(req.error || new Error('Failed to open IndexedDB'));
  });
}

async function withImages(mode, fn) {
  const db = await openDb();
  try {
    const tx = db.transaction(IMAGES_STORE, mode);
    const result = await fn(tx.objectStore(IMAGES_STORE));
    await txDone(tx);
    return result;
  } finally {
    db.close();
  }
}

async function fetchWithTimeout(url, init, timeoutMs) {
  const controller = typeof AbortController !== 'undefined' ? new AbortController() : null;
  const timer = controller && timeoutMs > 0 ? setTimeout(() => controller.abort(), timeoutMs) : null;
  try {
    return await fetch(url, controller ? { ...init, signal: controller.signal } : init);
  } catch (err) {
    if (err && err.name === 'AbortError') {
      fail(`request to ${url} timed out after ${timeoutMs} ms`);
    }
    throw err;
  } finally {
    if (timer !== null) clearTimeout(timer);
  }
}

async function readResponse(response) {
  if (!response.ok) {
    return { status: response.status, ok: false, body: null, bodyError: null };
  }
  try {
    return { status: response.status, ok: true, body: await response.json(), bodyError: null };
  } catch (err) {
    return { status: response.status, ok: true, body: null, bodyError: String(err && err.message || err) };
  }
}

export async function jsImagesAdd(record) {
  return await withImages('readwrite', async (store) => {
    await requestToPromise(store.add(record));
    return null;
  });
}

export async function jsUploadImages(url, sessionId, names, types, payloads, timeoutMs) {
  const form = new FormData();
  for (let i = 0; i < payloads.length; i++) {
    form.append('images', new File([payloads[i]], names[i], { type: types[i] }));
  }
  form.append('sessionId', sessionId);
  const response = await fetchWithTimeout(url, { method: 'POST', body: form }, timeoutMs);
  return await readResponse(response);
}

export async function jsPostJson(url, payload, timeoutMs) {
  const response = await fetchWithTimeout(url, {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(payload),
  }, timeoutMs);
  return await readResponse(response);
}

export function jsPreloadImage(url) {
  if (typeof Image === 'undefined') return;
  const img = new Image();
  img.src = url;
}
"#)]
extern "C" {
    #[wasm_bindgen(js_name = jsImagesAdd)]
    fn js_images_add(record: JsValue) -> Promise;

    #[wasm_bindgen(js_name = jsUploadImages)]
    fn js_upload_images(
        url: &str,
        session_id: &str,
        names: Array,
        types: Array,
        payloads: Array,
        timeout_ms: u32,
    ) -> Promise;
    #[wasm_bindgen(js_name = jsPostJson)]
    fn js_post_json(url: &str, payload: JsValue, timeout_ms: u32) -> Promise;

    #[wasm_bindgen(js_name = jsPreloadImage)]
    fn js_preload_image(url: &str);
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResponse {
    status: u16,
    ok: bool,
    body: Option<Value>,
    body_error: Option<String>,
}

impl RawResponse {
    fn into_result(self) -> Result<Value, GameApiError> {
        if !self.ok {
            return Err(GameApiError::Status {
                status: self.status,
            });
        }
        if let Some(message) = self.body_error {
            return Err(GameApiError::Decode { message });
        }
        Ok(self.body.unwrap_or(Value::Null))
    }
}

async fn await_promise(promise: Promise) -> Result<JsValue, String> {
    JsFuture::from(promise).await.map_err(js_error_to_string)
}

fn js_error_to_string(err: JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    if let Ok(message) = js_sys::Reflect::get(&err, &JsValue::from_str("message")) {
        if let Some(text) = message.as_string() {
            return text;
        }
    }
    format!("{err:?}")
}

async fn await_response(promise: Promise) -> Result<Value, GameApiError> {
    let value = await_promise(promise).await.map_err(GameApiError::network)?;
    let raw: RawResponse = from_value(value).map_err(|err| GameApiError::Decode {
        message: err.to_string(),
    })?;
    raw.into_result()
}

pub async fn images_add(record: &StoredImageRecord) -> Result<(), String> {
    let value = record
        .serialize(&Serializer::json_compatible())
        .map_err(|e| e.to_string())?;
    let _ = await_promise(js_images_add(value)).await?;
    Ok(())
}

pub async fn upload_images(
    url: &str,
    session_id: &str,
    files: &[CandidateFile],
    timeout_ms: u32,
) -> Result<Value, GameApiError> {
    let names = Array::new();
    let types = Array::new();
    let payloads = Array::new();
    for file in files {
        names.push(&JsValue::from_str(&file.name));
        types.push(&JsValue::from_str(&file.mime_type));
        payloads.push(&Uint8Array::from(&file.bytes[..]));
    }
    await_response(js_upload_images(
        url, session_id, names, types, payloads, timeout_ms,
    ))
    .await
}

pub async fn post_json(url: &str, payload: &Value, timeout_ms: u32) -> Result<Value, GameApiError> {
    let payload = payload
        .serialize(&Serializer::json_compatible())
        .map_err(|err| GameApiError::Decode {
            message: err.to_string(),
        })?;
    await_response(js_post_json(url, payload, timeout_ms)).await
}

pub fn preload_image(url: &str) {
    js_preload_image(url);
}
