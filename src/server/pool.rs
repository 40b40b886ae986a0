//! # Pool de workers con cola acotada
//! src/server/pool.rs
//!
//! El thread que acepta conexiones las encola; cada worker saca una y la
//! atiende completa antes de tomar la siguiente. Si la cola está llena,
//! `push` bloquea al que acepta (backpressure hacia el backlog del SO).

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use tracing::debug;

struct QueueState<T> {
    items: VecDeque<T>,
    closed: bool,
}

/// Cola FIFO thread-safe de capacidad fija
pub struct BoundedQueue<T> {
    state: Mutex<QueueState<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(QueueState {
                items: VecDeque::with_capacity(capacity),
                closed: false,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Encola un elemento, esperando si la cola está llena
    ///
    /// Retorna el elemento de vuelta si la cola ya fue cerrada.
    pub fn push(&self, item: T) -> Result<(), T> {
        let mut state = self.lock();
        while state.items.len() >= self.capacity && !state.closed {
            state = self
                .not_full
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        if state.closed {
            return Err(item);
        }
        state.items.push_back(item);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Desencola, esperando si está vacía
    ///
    /// `None` cuando la cola fue cerrada y ya no quedan elementos.
    pub fn pop(&self) -> Option<T> {
        let mut state = self.lock();
        loop {
            if let Some(item) = state.items.pop_front() {
                self.not_full.notify_one();
                return Some(item);
            }
            if state.closed {
                return None;
            }
            state = self
                .not_empty
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Cierra la cola; los elementos pendientes se siguen entregando
    pub fn close(&self) {
        self.lock().closed = true;
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Workers que consumen una `BoundedQueue` compartida
pub struct WorkerPool<T> {
    queue: Arc<BoundedQueue<T>>,
    workers: Vec<JoinHandle<()>>,
}

impl<T: Send + 'static> WorkerPool<T> {
    /// Lanza `size` workers que ejecutan `handler` por cada elemento
    pub fn new<F>(size: usize, capacity: usize, handler: F) -> std::io::Result<Self>
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        let queue = Arc::new(BoundedQueue::new(capacity));
        let handler = Arc::new(handler);
        let mut workers = Vec::with_capacity(size);

        for id in 0..size {
            let queue = Arc::clone(&queue);
            let handler = Arc::clone(&handler);
            let worker = thread::Builder::new()
                .name(format!("worker-{}", id))
                .spawn(move || {
                    while let Some(item) = queue.pop() {
                        handler(item);
                    }
                    debug!("worker-{} terminado", id);
                })?;
            workers.push(worker);
        }

        Ok(Self { queue, workers })
    }

    /// Entrega un elemento a los workers; bloquea si la cola está llena
    pub fn submit(&self, item: T) -> Result<(), T> {
        self.queue.push(item)
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Cierra la cola y espera a que los workers vacíen lo pendiente
    pub fn shutdown(self) {
        self.queue.close();
        for worker in self.workers {
            let _ = worker.join();
        }
    }
}
