use mounted_core::{disposable_effect, remember, remember_callback};

use crate::{AsyncRunner, Produced, ProducerFn, Reactions, RunnerOptions};

/// Runs `producer` after this render if it is a different producer from the
/// previous render's, superseding the previous activation.
///
/// Building a fresh `ProducerFn` every render therefore activates every
/// render. Use [`use_mounted_async_with`] to key activations on explicit
/// dependencies instead.
pub fn use_mounted_async<T: 'static, E: 'static>(producer: ProducerFn<T, E>) {
    use_mounted_async_with_options(producer, RunnerOptions::default());
}

pub fn use_mounted_async_with_options<T: 'static, E: 'static>(
    producer: ProducerFn<T, E>,
    options: RunnerOptions,
) {
    let runner = remember(|| AsyncRunner::new(options));

    disposable_effect(producer.clone(), move || runner.activate(&producer).into_dispose());
}

/// Like [`use_mounted_async`], but the producer is kept from the render on
/// which `deps` last changed, so re-rendering with equal `deps` does not
/// start a new activation.
pub fn use_mounted_async_with<D, T, E, F>(deps: D, producer: F)
where
    D: PartialEq + 'static,
    T: 'static,
    E: 'static,
    F: Fn(&mut Reactions<T, E>) -> Produced<T, E> + 'static,
{
    let producer = ProducerFn::from_rc(remember_callback(deps, producer));
    use_mounted_async(producer);
}
