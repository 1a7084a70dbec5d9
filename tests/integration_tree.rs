use term_form::widgets::{ButtonAction, Widget};
use term_form::{Form, FormError};

fn names(form: &Form) -> Vec<&str> {
    form.order().names().iter().map(String::as_str).collect()
}

fn panel() -> Widget {
    Widget::container(30, 8, 0, 0)
        .with_child("street", Widget::text_input(""))
        .unwrap()
        .with_child("city", Widget::text_input(""))
        .unwrap()
}

#[test]
fn slot_order_stays_contiguous_through_inserts() {
    let mut form = Form::new();
    form.add("b", Widget::text_input(""), None).unwrap();
    assert_eq!(form.add("a", Widget::text_input(""), Some(0)).unwrap(), 0);
    assert_eq!(form.add("d", Widget::text_input(""), Some(99)).unwrap(), 2);
    assert_eq!(form.add("c", Widget::text_input(""), Some(2)).unwrap(), 2);
    assert_eq!(names(&form), vec!["a", "b", "c", "d"]);

    for (slot, name) in names(&form).into_iter().enumerate() {
        assert_eq!(form.order().slot_of(name), Some(slot));
    }
}

#[test]
fn nested_widgets_flatten_depth_first() {
    let mut form = Form::new();
    form.add("name", Widget::text_input(""), None).unwrap();
    form.add("submit", Widget::button("Submit", ButtonAction::Submit), None)
        .unwrap();
    form.add("address", panel(), Some(1)).unwrap();

    assert_eq!(
        names(&form),
        vec!["name", "address", "street", "city", "submit"]
    );
    assert_eq!(
        form.widget("city").unwrap().state.owner.as_deref(),
        Some("address")
    );

    form.remove("address").unwrap();
    assert_eq!(names(&form), vec!["name", "submit"]);
    assert!(form.widget("street").is_none());
}

#[test]
fn names_are_unique_across_the_whole_form() {
    let mut form = Form::new();
    form.add("street", Widget::label("Street"), None).unwrap();
    let err = form.add("address", panel(), None).unwrap_err();
    assert!(matches!(err, FormError::DuplicateName { .. }), "{err:?}");
    assert_eq!(names(&form), vec!["street"]);
}

#[test]
fn removing_unknown_names_fails() {
    let mut form = Form::new();
    form.add("a", Widget::text_input(""), None).unwrap();
    assert!(matches!(
        form.remove("missing"),
        Err(FormError::NotFound { .. })
    ));
    assert_eq!(form.len(), 1);
}

#[test]
fn add_then_remove_leaves_the_order_unchanged() {
    let mut form = Form::new();
    for name in ["a", "b", "c"] {
        form.add(name, Widget::text_input(""), None).unwrap();
    }
    let before: Vec<String> = form.order().names().to_vec();
    form.add("address", panel(), Some(1)).unwrap();
    form.remove("address").unwrap();
    assert_eq!(form.order().names(), before.as_slice());
}
