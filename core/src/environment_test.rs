use crate::environment::Environment;

#[test]
fn test_define_and_get() {
    let env: Environment<i64> = Environment::new();
    env.define("x", 1);
    assert_eq!(env.get("x"), Some(1));
    assert_eq!(env.get("y"), None);
}

#[test]
fn test_define_overwrites_in_same_frame() {
    let env = Environment::new();
    env.define("x", 1);
    env.define("x", 2);
    assert_eq!(env.get("x"), Some(2));
}

#[test]
fn test_probe_only_checks_current_frame() {
    let outer = Environment::new();
    outer.define("x", 1);
    let inner = outer.child();

    assert!(outer.probe("x"));
    assert!(!inner.probe("x"));
    assert_eq!(inner.get("x"), Some(1));
}

#[test]
fn test_shadowing_does_not_touch_outer() {
    let outer = Environment::new();
    outer.define("x", 1);
    let inner = outer.child();
    inner.define("x", 2);

    assert_eq!(inner.get("x"), Some(2));
    assert_eq!(outer.get("x"), Some(1));
}

#[test]
fn test_assign_walks_outward() {
    let outer = Environment::new();
    outer.define("x", 1);
    let inner = outer.child().child();

    assert!(inner.assign("x", 5));
    assert_eq!(outer.get("x"), Some(5));
    assert!(!inner.probe("x"));
}

#[test]
fn test_assign_unbound_is_noop() {
    let env = Environment::new();
    env.define("x", 1);
    assert!(!env.child().assign("y", 2));
    assert_eq!(env.get("y"), None);
    assert_eq!(env.get("x"), Some(1));
}

#[test]
fn test_child_sees_later_definitions_in_parent() {
    let outer = Environment::new();
    let inner = outer.child();
    outer.define("late", 7);
    assert_eq!(inner.get("late"), Some(7));
}

#[test]
fn test_frame_outlives_dropped_parent_handle() {
    let inner = {
        let outer = Environment::new();
        outer.define("kept", 3);
        outer.child()
    };
    assert_eq!(inner.get("kept"), Some(3));
}

#[test]
fn test_ancestor_access() {
    let global = Environment::new();
    global.define("x", 1);
    let middle = global.child();
    middle.define("x", 2);
    let inner = middle.child();

    assert!(inner.ancestor(0).is_some_and(|env| env.ptr_eq(&inner)));
    assert!(inner.ancestor(2).is_some_and(|env| env.ptr_eq(&global)));
    assert!(inner.ancestor(3).is_none());

    assert_eq!(inner.get_at(1, "x"), Some(2));
    assert_eq!(inner.get_at(2, "x"), Some(1));
    assert_eq!(inner.get_at(0, "x"), None);

    assert!(inner.assign_at(2, "x", 10));
    assert_eq!(global.get("x"), Some(10));
    assert_eq!(middle.get("x"), Some(2));
    assert!(!inner.assign_at(0, "x", 10));
}

#[test]
fn test_clear_and_depth() {
    let global = Environment::new();
    global.define("a", 1);
    global.define("b", 2);
    let inner = global.child();
    assert_eq!(global.depth(), 0);
    assert_eq!(inner.depth(), 1);

    global.clear();
    assert_eq!(inner.get("a"), None);
    assert!(inner.enclosing().is_some_and(|env| env.ptr_eq(&global)));
}
