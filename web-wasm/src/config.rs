//! エンドポイント設定（ビルド時に CELLSCOPE_API_BASE で注入）

use cellscope_common::Endpoints;

pub fn endpoints() -> Endpoints {
    match option_env!("CELLSCOPE_API_BASE") {
        Some(base) if !base.trim().is_empty() => Endpoints::with_base_url(base.trim()),
        _ => Endpoints::default(),
    }
}
