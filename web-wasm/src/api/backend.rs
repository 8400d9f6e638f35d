//! 予測サーバー連携（fetch API）
//!
//! - 予測: FormData（フィールド `file`）をPOST
//! - 指標カタログ: GET

use cellscope_common::{MetricsCatalog, PredictionPayload, SelectedFile, SubmitError, FILE_FIELD};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, RequestMode, Response};

/// 選択ファイルからmultipart用のFormDataを作成
pub fn build_form_data(file: &SelectedFile) -> Result<FormData, JsValue> {
    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);

    let options = BlobPropertyBag::new();
    options.set_type(&file.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;

    let form = FormData::new()?;
    form.append_with_blob_and_filename(FILE_FIELD, &blob, &file.name)?;
    Ok(form)
}

/// fetchしてJSONを返す（非2xxはステータス付きエラー）
async fn fetch_json(request: &Request) -> Result<serde_json::Value, SubmitError> {
    let window = web_sys::window().ok_or_else(|| SubmitError::transport("windowが取得できません"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(|e| SubmitError::transport(format!("{:?}", e)))?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|e| SubmitError::transport(format!("{:?}", e)))?;

    if !resp.ok() {
        return Err(SubmitError::http_status(resp.status(), resp.status_text()));
    }

    // JSONの整数をf64に潰さないようテキストで受ける
    let text_promise = resp.text().map_err(|e| SubmitError::transport(format!("{:?}", e)))?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|e| SubmitError::transport(format!("{:?}", e)))?
        .as_string()
        .unwrap_or_default();
    serde_json::from_str(&text).map_err(|e| SubmitError::transport(format!("JSONではない応答: {}", e)))
}

/// 画像を送信して予測結果を受け取る
///
/// `success: false` の判定は UploadSession 側で行う。
pub async fn submit_prediction(url: &str, file: &SelectedFile) -> Result<PredictionPayload, SubmitError> {
    let form = build_form_data(file).map_err(|e| SubmitError::transport(format!("{:?}", e)))?;

    // Content-TypeはブラウザがFormDataのboundary付きで設定する
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| SubmitError::transport(format!("{:?}", e)))?;

    let value = fetch_json(&request).await.inspect_err(|e| {
        gloo::console::error!(format!("予測リクエスト失敗: {}", e));
    })?;
    Ok(PredictionPayload::from(value))
}

/// 指標カタログを取得
pub async fn fetch_metrics(url: &str) -> Result<MetricsCatalog, String> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts).map_err(|e| format!("{:?}", e))?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(|e| format!("{:?}", e))?;

    let value = fetch_json(&request).await.map_err(|e| e.to_string())?;
    serde_json::from_value(value).map_err(|e| format!("指標カタログの形式が不正: {}", e))
}
