//! Application state and view

use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};
use std::time::Duration;

use anyhow::Result;
use eframe::egui;
use pubfetch_entrez::{Client, extract_article};
use pubfetch_store::Store;

/// Messages from the ingest worker back to the view.
enum WorkerMsg {
    /// One article was upserted
    Row { pmid: String, title: String },
    /// Ingest finished cleanly
    Finished { inserted: usize },
    /// Ingest aborted
    Failed(String),
}

fn format_row(pmid: &str, title: &str) -> String {
    format!("{pmid}: {title}")
}

pub struct App {
    db_path: PathBuf,
    entrez_config: pubfetch_entrez::Config,
    affiliation: String,
    rows: Vec<String>,
    status: String,
    /// Receiver for the in-flight ingest; None when idle
    worker: Option<Receiver<WorkerMsg>>,
}

impl App {
    pub fn new(db_path: PathBuf, entrez_config: pubfetch_entrez::Config) -> Self {
        Self {
            db_path,
            entrez_config,
            affiliation: String::new(),
            rows: Vec::new(),
            status: String::new(),
            worker: None,
        }
    }

    /// Spawn one background ingest for the current affiliation.
    ///
    /// The worker opens its own store connection; results stream back over
    /// the channel and the view appends them in received order.
    fn start_search(&mut self) {
        let (tx, rx) = channel();
        self.worker = Some(rx);
        self.rows.clear();
        self.status = format!("Searching for '{}'...", self.affiliation.trim());

        let affiliation = self.affiliation.trim().to_string();
        let db_path = self.db_path.clone();
        let config = self.entrez_config.clone();
        std::thread::spawn(move || {
            match ingest(&affiliation, &db_path, config, &tx) {
                Ok(inserted) => {
                    let _ = tx.send(WorkerMsg::Finished { inserted });
                }
                Err(e) => {
                    log::error!("Ingest failed: {e:#}");
                    let _ = tx.send(WorkerMsg::Failed(e.to_string()));
                }
            }
        });
    }

    fn poll_worker(&mut self) {
        let mut done = false;
        if let Some(rx) = &self.worker {
            loop {
                match rx.try_recv() {
                    Ok(WorkerMsg::Row { pmid, title }) => {
                        self.rows.push(format_row(&pmid, &title));
                    }
                    Ok(WorkerMsg::Finished { inserted }) => {
                        self.status = format!("Inserted {inserted} articles");
                    }
                    Ok(WorkerMsg::Failed(msg)) => {
                        self.status = format!("Search failed: {msg}");
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        done = true;
                        break;
                    }
                }
            }
        }
        if done {
            self.worker = None;
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_worker();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.affiliation)
                        .hint_text("Affiliation")
                        .desired_width(ui.available_width() - 80.0),
                );
                let idle = self.worker.is_none();
                let ready = idle && !self.affiliation.trim().is_empty();
                if ui
                    .add_enabled(ready, egui::Button::new("Search"))
                    .clicked()
                {
                    self.start_search();
                }
            });

            if !self.status.is_empty() {
                ui.label(&self.status);
            }
            ui.separator();

            egui::ScrollArea::vertical().auto_shrink(false).show(ui, |ui| {
                for row in &self.rows {
                    ui.label(row);
                }
            });
        });

        // Keep polling while a search is in flight
        if self.worker.is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

/// Run the ingest pipeline, streaming one message per stored article.
fn ingest(
    affiliation: &str,
    db_path: &Path,
    config: pubfetch_entrez::Config,
    tx: &Sender<WorkerMsg>,
) -> Result<usize> {
    let retmax = config.retmax;
    let client = Client::new(config);
    let mut store = Store::open(db_path)?;

    let pmids = client.search_affiliation(affiliation, retmax)?;
    let records = client.fetch_metadata(&pmids)?;

    let mut inserted = 0;
    for record in &records {
        let article = extract_article(record);
        store.upsert(&article)?;
        let _ = tx.send(WorkerMsg::Row {
            pmid: article.pmid,
            title: article.title,
        });
        inserted += 1;
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_format() {
        assert_eq!(format_row("12345", "Test Article"), "12345: Test Article");
    }
}
