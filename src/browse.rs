//! CLIからのギャラリー閲覧
//!
//! ブラウザ版と同じ [`GalleryController`] を [`GalleryClient`] で駆動する。
//! CLIの入力は確定済みなので、検索語はデバウンスを待たずに即座に確定させる。

use crate::client::GalleryClient;
use crate::error::{GalleryError, Result};
use photo_gallery_common::{
    CursorLookup, FetchOutcome, FetchRequest, GalleryController, GalleryView,
};
use tracing::{debug, warn};

pub struct Browser {
    client: GalleryClient,
    controller: GalleryController,
}

impl Browser {
    pub fn new(client: GalleryClient, page_size: u32) -> Self {
        Self {
            client,
            controller: GalleryController::new(page_size),
        }
    }

    pub fn controller(&self) -> &GalleryController {
        &self.controller
    }

    /// 1ページ目を取得
    ///
    /// 検索語があれば先に確定させ、絞り込んだ1ページ目だけを取得する。
    pub async fn open(&mut self, search: Option<&str>) -> Result<()> {
        let settled = search.and_then(|term| {
            let ticket = self.controller.edit_search(term);
            self.controller.settle_search(ticket)
        });
        let request = match settled {
            Some(request) => request,
            None => self.controller.start(),
        };
        self.run(request).await
    }

    pub async fn search(&mut self, term: &str) -> Result<()> {
        let ticket = self.controller.edit_search(term);
        match self.controller.settle_search(ticket) {
            Some(request) => self.run(request).await,
            None => Ok(()),
        }
    }

    /// 指定ページへ移動
    ///
    /// 前ページのカーソルが未取得なら、1ページずつ進めてカーソルを集める。
    pub async fn goto(&mut self, page: u32) -> Result<()> {
        if page == 0 {
            return Err(GalleryError::Validation("page must be 1 or greater".into()));
        }

        loop {
            let current = self.controller.current_page();
            if current == page {
                return Ok(());
            }

            let cursors = self.controller.cursors();
            let step = match cursors.cursor_for(page) {
                CursorLookup::Missing if page > current => current + 1,
                _ => page,
            };
            if cursors.cursor_for(step) == CursorLookup::Missing {
                return Err(GalleryError::Validation(format!(
                    "page {} is not reachable: no cursor after page {}",
                    page,
                    step - 1
                )));
            }

            let Some(request) = self.controller.click_page(step) else {
                return Ok(());
            };
            self.run(request).await?;
        }
    }

    pub async fn next_page(&mut self) -> Result<()> {
        let next = self.controller.current_page() + 1;
        self.goto(next).await
    }

    pub async fn previous_page(&mut self) -> Result<()> {
        let previous = self.controller.current_page().saturating_sub(1).max(1);
        self.goto(previous).await
    }

    /// 削除して現在のページを再取得
    ///
    /// 削除自体が成功していれば `Ok` を返す。再取得の失敗は画面のエラー状態に残る。
    pub async fn delete(&mut self, public_id: &str) -> Result<serde_json::Value> {
        let result = self.client.delete(public_id).await?;
        if let Err(e) = self.refresh().await {
            warn!(error = %e, "deleted {public_id} but failed to reload the page");
        }
        Ok(result)
    }

    pub async fn refresh(&mut self) -> Result<()> {
        let request = self.controller.image_deleted();
        self.run(request).await
    }

    async fn run(&mut self, request: FetchRequest) -> Result<()> {
        if request.cursor_missing {
            warn!(page = request.page, "cursor for previous page is unknown, fetching without it");
        }
        debug!(seq = request.seq, page = request.page, term = %request.term, "fetching");

        match self.client.list(&request.query).await {
            Ok(response) => {
                let outcome = self.controller.complete(request.seq, Ok(response));
                if outcome == FetchOutcome::Stale {
                    debug!(seq = request.seq, "discarded stale response");
                }
                Ok(())
            }
            Err(e) => {
                self.controller.complete(request.seq, Err(error_message(&e)));
                Err(e)
            }
        }
    }
}

/// 画面に出すエラーメッセージ（APIの本文メッセージを優先）
pub fn error_message(error: &GalleryError) -> String {
    match error {
        GalleryError::Api { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

/// 現在のページをテキストで描画
pub fn render_page(controller: &GalleryController) -> String {
    let mut lines = Vec::new();

    if let Some(heading) = controller.results_heading() {
        lines.push(heading);
    }

    match controller.view() {
        GalleryView::Loading => lines.push("Loading Images...".to_string()),
        GalleryView::Failed(error) => lines.push(format!("Error: {}", error)),
        GalleryView::Empty => lines.push(controller.empty_message()),
        GalleryView::Grid(images) => {
            for (i, image) in images.iter().enumerate() {
                lines.push(format!(
                    "{:>3}. {}  ({})  {}",
                    i + 1,
                    image.title(),
                    image.dimensions(),
                    image.public_id
                ));
                lines.push(format!("     {}", image.secure_url));
            }
        }
    }

    if controller.total_pages() > 0 {
        lines.push(format!(
            "page {} / {}  (total {})",
            controller.current_page(),
            controller.total_pages(),
            controller.total_count()
        ));
    }

    lines.join("\n")
}
