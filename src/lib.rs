//! CellScope CLI
//!
//! 細胞画像を予測サーバーへ送り、返ってきた分類・検出結果を表示する。

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod intake;
pub mod logging;
pub mod submit;
pub mod view;
