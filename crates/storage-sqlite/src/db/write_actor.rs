//! Single-writer actor for the SQLite database.
//!
//! One background task owns one connection and processes write jobs
//! serially, each inside an immediate transaction. Multi-statement jobs
//! (goal plus linked plan, the full contribution posting) therefore commit
//! or roll back as a unit.

use super::DbPool;
use crate::errors::StorageError;
use diesel::result::Error as DieselError;
use diesel::SqliteConnection;
use nestegg_core::errors::{Error, Result};
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

/// Transaction error carrier: preserves typed core errors raised by the
/// job (NotFound, InsufficientFunds, ...) across the rollback boundary.
enum TxError {
    Core(Error),
    Storage(StorageError),
}

impl From<DieselError> for TxError {
    fn from(err: DieselError) -> Self {
        TxError::Storage(StorageError::QueryFailed(err))
    }
}

impl From<TxError> for Error {
    fn from(err: TxError) -> Self {
        match err {
            TxError::Core(e) => e,
            TxError::Storage(e) => e.into(),
        }
    }
}

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    #[allow(clippy::type_complexity)]
    tx: mpsc::Sender<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>,
}

impl WriteHandle {
    /// Executes a database job inside an immediate transaction on the
    /// writer's dedicated connection.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .expect("Writer actor's receiving channel was closed, indicating the actor stopped.");

        ret_rx
            .await
            .expect("Writer actor dropped the reply sender without sending a result.")
            .map(|boxed: Box<dyn Any + Send + 'static>| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("Failed to downcast writer actor result."))
            })
    }
}

/// Spawns the writer actor and returns its handle.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    #[allow(clippy::type_complexity)]
    let (tx, mut rx) = mpsc::channel::<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>,
    )>(1024);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("Failed to get a connection from the DB pool for the writer actor.");

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, TxError, _>(|c| job(c).map_err(TxError::Core))
                .map_err(Error::from);

            // Receiver may have been dropped by a cancelled caller.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
