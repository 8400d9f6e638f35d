//! アップロードエリアコンポーネント
//!
//! 1ファイルだけ受け付ける。画像以外もブラウザ次第で選べてしまうが、拒否はしない。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, File, FileReader, HtmlInputElement};
use cellscope_common::SelectedFile;

#[component]
pub fn UploadArea<F>(
    preview: Signal<Option<String>>,
    file_name: Signal<Option<String>>,
    on_file_selected: F,
) -> impl IntoView
where
    F: Fn(SelectedFile) + 'static + Clone + Send + Sync,
{
    let (is_dragover, set_is_dragover) = signal(false);
    // 読み込み順が前後しても最後に選んだファイルだけ反映する
    let selection_seq = RwSignal::new(0u64);

    let handle_file = move |file: File| {
        let seq = selection_seq.get_untracked() + 1;
        selection_seq.set(seq);
        let on_file_selected = on_file_selected.clone();
        read_file(file, move |selected| {
            if selection_seq.get_untracked() == seq {
                on_file_selected(selected);
            }
        });
    };

    let on_drop = {
        let handle_file = handle_file.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if let Some(file) = ev.data_transfer().and_then(|dt| dt.files()).and_then(|files| files.get(0)) {
                handle_file(file);
            }
        }
    };

    let on_change = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            handle_file(file);
        }
    };

    view! {
        <div
            class=move || if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
            on:drop=on_drop
            on:dragover=move |ev: DragEvent| {
                ev.prevent_default();
                set_is_dragover.set(true);
            }
            on:dragleave=move |_: DragEvent| set_is_dragover.set(false)
        >
            <label class="upload-label">
                <div class="upload-icon">"🔬"</div>
                <p>"細胞画像をドラッグ&ドロップ または クリックして選択"</p>
                <input type="file" accept="image/*" class="hidden-input" on:change=on_change />
            </label>

            <Show when=move || preview.get().is_some()>
                <figure class="preview">
                    <img src=move || preview.get().unwrap_or_default() alt="プレビュー" />
                    <figcaption>{move || file_name.get().unwrap_or_default()}</figcaption>
                </figure>
            </Show>
        </div>
    }
}

fn read_file<F>(file: File, on_loaded: F)
where
    F: Fn(SelectedFile) + 'static,
{
    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            gloo::console::error!(format!("FileReaderの作成に失敗: {:?}", e));
            return;
        }
    };

    let file_name = file.name();
    let reader_clone = reader.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        let Some(data_url) = reader_clone.result().ok().and_then(|r| r.as_string()) else {
            return;
        };
        match SelectedFile::from_data_uri(file_name.clone(), &data_url) {
            Ok(selected) => on_loaded(selected),
            Err(e) => gloo::console::error!(format!("ファイル読み込み失敗: {}", e)),
        }
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    if let Err(e) = reader.read_as_data_url(&file) {
        gloo::console::error!(format!("ファイル読み込み失敗: {:?}", e));
    }
}
