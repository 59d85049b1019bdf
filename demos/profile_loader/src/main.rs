use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use anyhow::anyhow;
use futures::channel::oneshot;
use mounted_async::{Produced, Reactions, use_mounted_async_with};
use mounted_core::{Composition, LocalExecutor};

#[derive(Clone, Debug)]
struct Profile {
    id: u32,
    name: String,
}

#[derive(Debug, thiserror::Error)]
enum LookupError {
    #[error("user {0} not found")]
    NotFound(u32),
    #[error("backend went away")]
    Disconnected,
}

type Reply = oneshot::Sender<Result<Profile, LookupError>>;

/// Pretend server: requests stay in flight until `respond_all`.
#[derive(Default)]
struct Backend {
    inflight: RefCell<Vec<(u32, Reply)>>,
}

impl Backend {
    fn fetch(&self, id: u32) -> impl Future<Output = Result<Profile, LookupError>> + 'static {
        let (tx, rx) = oneshot::channel();
        self.inflight.borrow_mut().push((id, tx));
        log::info!("backend: GET /users/{id}");
        async move { rx.await.unwrap_or(Err(LookupError::Disconnected)) }
    }

    fn respond_all(&self) -> anyhow::Result<()> {
        let inflight = std::mem::take(&mut *self.inflight.borrow_mut());
        for (id, reply) in inflight {
            let result = if id >= 400 {
                Err(LookupError::NotFound(id))
            } else {
                Ok(Profile {
                    id,
                    name: format!("user-{id}"),
                })
            };
            reply
                .send(result)
                .map_err(|_| anyhow!("request for user {id} was abandoned"))?;
        }
        Ok(())
    }
}

/// The "component": shows one user's profile line.
fn profile_line(selected: Option<u32>, backend: Rc<Backend>, status: Rc<RefCell<String>>) {
    use_mounted_async_with(selected, move |r: &mut Reactions<Profile, LookupError>| {
        let Some(id) = selected else {
            *status.borrow_mut() = "no user selected".into();
            return Produced::Idle;
        };
        *status.borrow_mut() = format!("loading user {id}...");

        r.always(move |ok| log::info!("user {id}: settled (ok = {ok})"));
        {
            let status = status.clone();
            r.success(move |p| *status.borrow_mut() = format!("#{} {}", p.id, p.name));
        }
        {
            let status = status.clone();
            r.error(move |e| *status.borrow_mut() = format!("error: {e}"));
        }
        r.finally(move || log::info!("user {id}: done"));

        Produced::pending(backend.fetch(id))
    });
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut exec = LocalExecutor::new();
    exec.install();

    let backend = Rc::new(Backend::default());
    let status = Rc::new(RefCell::new(String::new()));
    let comp = Composition::new();

    let render = |selected: Option<u32>| {
        let (backend, status) = (backend.clone(), status.clone());
        comp.render(move || profile_line(selected, backend, status));
    };

    render(None);
    println!("{}", status.borrow());

    render(Some(1));
    render(Some(1)); // same deps: no new request
    backend.respond_all()?;
    exec.run_until_stalled();
    println!("{}", status.borrow());

    // quick clicks: only the last selection is delivered
    render(Some(2));
    render(Some(3));
    backend.respond_all()?;
    exec.run_until_stalled();
    println!("{}", status.borrow());

    render(Some(404));
    backend.respond_all()?;
    exec.run_until_stalled();
    println!("{}", status.borrow());

    // unmount while a request is in flight: the reply is ignored
    render(Some(5));
    comp.dispose();
    backend.respond_all()?;
    exec.run();
    println!("{} (after unmount)", status.borrow());

    Ok(())
}
