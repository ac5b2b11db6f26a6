use crate::canvas::Canvas;
use crate::keygen::KeyGen;
use crate::requests::{CreateCanvas, DrawRect, FloodFill};
use crate::service::{CanvasService, DocumentPage};
use crate::store::DocumentStore;
use crate::{Error, Result};
use log::debug;
use std::sync::mpsc::{self, Sender};
use std::thread;
use tokio::sync::oneshot;

enum Command {
    Create(CreateCanvas, oneshot::Sender<Result<String>>),
    Get(String, oneshot::Sender<Result<Canvas>>),
    List(u64, usize, oneshot::Sender<Result<DocumentPage>>),
    Delete(String, oneshot::Sender<Result<()>>),
    DrawRect(String, DrawRect, oneshot::Sender<Result<Canvas>>),
    FloodFill(String, FloodFill, oneshot::Sender<Result<Canvas>>),

    Close(oneshot::Sender<Result<()>>),
}

/// An async-friendly handle to a [`CanvasService`] owned by a dedicated
/// worker thread.
///
/// Commands from any number of tasks are queued and executed one at a time,
/// so two edits of the same document never interleave.
#[derive(Clone)]
pub struct CanvasHandle {
    cmd_tx: Sender<Command>,
}

impl CanvasHandle {
    /// Move `service` onto a new worker thread.
    pub fn spawn<S, K>(service: CanvasService<S, K>) -> Self
    where
        S: DocumentStore + 'static,
        K: KeyGen + 'static,
    {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();

        thread::spawn(move || {
            debug!("canvas worker started");

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::Create(req, resp) => {
                        let _ = resp.send(service.create_document(req));
                    }
                    Command::Get(key, resp) => {
                        let _ = resp.send(service.get_document(&key));
                    }
                    Command::List(cursor, limit, resp) => {
                        let _ = resp.send(service.list_documents(cursor, limit));
                    }
                    Command::Delete(key, resp) => {
                        let _ = resp.send(service.delete_document(&key));
                    }
                    Command::DrawRect(key, req, resp) => {
                        let _ = resp.send(service.draw_rect(&key, &req));
                    }
                    Command::FloodFill(key, req, resp) => {
                        let _ = resp.send(service.flood_fill(&key, &req));
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(Ok(()));
                        break;
                    }
                }
            }

            debug!("canvas worker stopped");
        });

        Self { cmd_tx }
    }

    async fn call<T>(
        &self,
        what: &str,
        make: impl FnOnce(oneshot::Sender<Result<T>>) -> Command,
    ) -> Result<T> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .map_err(|_| Error::Other(format!("{} failed: canvas worker is gone", what)))?;
        rx.await
            .map_err(|e| Error::Other(format!("{} canceled: {}", what, e)))?
    }

    pub async fn create(&self, req: CreateCanvas) -> Result<String> {
        self.call("Create", |tx| Command::Create(req, tx)).await
    }

    pub async fn get(&self, key: &str) -> Result<Canvas> {
        let key = key.to_string();
        self.call("Get", |tx| Command::Get(key, tx)).await
    }

    pub async fn list(&self, cursor: u64, limit: usize) -> Result<DocumentPage> {
        self.call("List", |tx| Command::List(cursor, limit, tx)).await
    }

    pub async fn delete(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        self.call("Delete", |tx| Command::Delete(key, tx)).await
    }

    pub async fn draw_rect(&self, key: &str, req: DrawRect) -> Result<Canvas> {
        let key = key.to_string();
        self.call("DrawRect", |tx| Command::DrawRect(key, req, tx)).await
    }

    pub async fn flood_fill(&self, key: &str, req: FloodFill) -> Result<Canvas> {
        let key = key.to_string();
        self.call("FloodFill", |tx| Command::FloodFill(key, req, tx)).await
    }

    /// Stop the worker. Other clones of the handle fail from then on.
    pub async fn close(self) -> Result<()> {
        self.call("Close", Command::Close).await
    }
}
