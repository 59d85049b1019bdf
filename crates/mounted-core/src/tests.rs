use crate::scope::*;
use crate::*;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_scope_drop_runs_disposers() {
    let cleaned_up = Rc::new(RefCell::new(false));

    {
        let scope = Scope::new();
        let cleaned_up_clone = cleaned_up.clone();
        scope.add_disposer(move || {
            *cleaned_up_clone.borrow_mut() = true;
        });

        assert!(!*cleaned_up.borrow());
    } // last handle drops here

    assert!(*cleaned_up.borrow());
}

#[test]
fn test_scope_explicit_dispose() {
    let cleaned_up = Rc::new(RefCell::new(0));

    let scope = Scope::new();
    let cleaned_up_clone = cleaned_up.clone();
    scope.add_disposer(move || {
        *cleaned_up_clone.borrow_mut() += 1;
    });

    let keep = scope.clone();
    assert_eq!(*cleaned_up.borrow(), 0);
    scope.dispose();
    assert_eq!(*cleaned_up.borrow(), 1);

    // a second handle does not run it again
    assert!(keep.is_disposed());
    drop(keep);
    assert_eq!(*cleaned_up.borrow(), 1);
}

#[test]
fn test_children_dispose_before_parent() {
    let order = Rc::new(RefCell::new(Vec::new()));

    let parent = Scope::new();
    let child = parent.child();
    {
        let order = order.clone();
        parent.add_disposer(move || order.borrow_mut().push("parent"));
    }
    {
        let order = order.clone();
        child.add_disposer(move || order.borrow_mut().push("child"));
    }

    parent.dispose();
    assert_eq!(*order.borrow(), vec!["child", "parent"]);
}

#[test]
fn test_disposer_added_after_teardown_runs_immediately() {
    let scope = Scope::new();
    let handle = scope.clone();
    scope.dispose();

    let ran = Rc::new(RefCell::new(false));
    let r = ran.clone();
    handle.add_disposer(move || *r.borrow_mut() = true);
    assert!(*ran.borrow());
}

#[test]
fn test_dispose_runs_once() {
    let count = Rc::new(RefCell::new(0));
    let c = count.clone();
    let d = on_unmount(move || *c.borrow_mut() += 1);

    assert!(!d.has_run());
    d.run();
    d.clone().run();
    assert!(d.has_run());
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_key_based_remember() {
    COMPOSER.with(|c| c.borrow_mut().keyed_slots.clear());

    let val1 = remember_with_key("test", || 42);
    let val2 = remember_with_key("test", || 100);

    // Should return the same instance
    assert_eq!(*val1, 42);
    assert_eq!(*val2, 42); // Not 100, because key exists
}

#[test]
fn test_slot_remember_survives_renders() {
    let comp = Composition::new();

    let (a, b) = comp.render(|| (remember(|| 1), remember_state(|| "x".to_string())));
    b.borrow_mut().push('y');

    let (a2, b2) = comp.render(|| (remember(|| 2), remember_state(|| String::new())));
    assert!(Rc::ptr_eq(&a, &a2));
    assert_eq!(*b2.borrow(), "xy");
    assert_eq!(comp.render_count(), 2);
}

#[test]
fn test_nested_remember_in_init_keeps_slot_order() {
    let comp = Composition::new();

    let outer = comp.render(|| remember(|| *remember(|| 7) + 1));
    let again = comp.render(|| remember(|| *remember(|| 0) + 100));
    assert_eq!(*outer, 8);
    assert!(Rc::ptr_eq(&outer, &again));
}

#[test]
fn test_compositions_do_not_share_slots() {
    let first = Composition::new();
    let second = Composition::new();

    let a = first.render(|| remember(|| 1));
    let b = second.render(|| remember(|| 2));
    assert_eq!((*a, *b), (1, 2));
}

#[test]
fn test_disposable_effect_reruns_on_key_change() {
    let log = Rc::new(RefCell::new(Vec::<String>::new()));
    let comp = Composition::new();

    let view = |key: u32| {
        let log = log.clone();
        move || {
            disposable_effect(key, move || {
                log.borrow_mut().push(format!("run {key}"));
                let log = log.clone();
                on_unmount(move || log.borrow_mut().push(format!("clean {key}")))
            });
        }
    };

    comp.render(view(1));
    comp.render(view(1));
    comp.render(view(2));
    comp.dispose();

    assert_eq!(
        *log.borrow(),
        vec!["run 1", "clean 1", "run 2", "clean 2"]
    );
}

#[test]
fn test_remember_callback_is_stable_while_deps_equal() {
    let comp = Composition::new();
    let render = |deps: (u8, u8), tag: &'static str| {
        comp.render(|| remember_callback(deps, move || tag))
    };

    let first = render((1, 2), "a");
    let same = render((1, 2), "b");
    let changed = render((1, 3), "c");

    assert!(Rc::ptr_eq(&first, &same));
    assert_eq!((*same)(), "a");
    assert!(!Rc::ptr_eq(&first, &changed));
    assert_eq!((*changed)(), "c");
}

#[test]
fn test_scoped_effect_cleans_up_with_composition() {
    let cleaned = Rc::new(RefCell::new(false));
    let comp = Composition::new();
    {
        let cleaned = cleaned.clone();
        comp.render(move || {
            scoped_effect(move || on_unmount(move || *cleaned.borrow_mut() = true));
        });
    }
    assert!(!*cleaned.borrow());
    comp.dispose();
    assert!(*cleaned.borrow());
}
