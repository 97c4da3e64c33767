use svg_relay::{sanitize, InMemoryStore, SubmissionError, SvgSubmissionService};

#[test]
fn stored_content_is_original_but_render_is_sanitized() {
    let service = SvgSubmissionService::new(InMemoryStore::new());
    let hostile = r#"<svg onload="alert(1)" width="10" height="10"><script>alert(2)</script><rect width="10" height="10"/></svg>"#;

    let record = service.submit(hostile).unwrap();
    assert_eq!(record.content, hostile);
    assert_eq!(record.element_count, 3);

    let rendered = service.current_sanitized().unwrap();
    assert_eq!(rendered.id, record.id);
    let markup = rendered.markup;
    assert_eq!(
        markup,
        r#"<svg width="10" height="10" viewBox="0 0 10 10"><rect width="10" height="10"/></svg>"#
    );
    assert_eq!(sanitize(&markup), markup);
}

#[test]
fn sanitized_on_empty_store_is_not_found() {
    let service = SvgSubmissionService::new(InMemoryStore::new());
    assert_eq!(service.current_sanitized().unwrap_err(), SubmissionError::NotFound);
}

#[test]
fn fully_stripped_record_renders_empty_root() {
    let service = SvgSubmissionService::new(InMemoryStore::new());
    service
        .submit(r#"<svg><foreignObject><div>hi</div></foreignObject></svg>"#)
        .unwrap();
    assert_eq!(service.current_sanitized().unwrap().markup, "<svg/>");
}

#[test]
fn sanitized_markup_follows_the_newest_record() {
    let service = SvgSubmissionService::new(InMemoryStore::new());
    service.submit(r#"<svg><rect width="1" height="1"/></svg>"#).unwrap();
    let second = service.submit(r#"<svg><circle r="2"/></svg>"#).unwrap();

    let rendered = service.current_sanitized().unwrap();
    assert_eq!(rendered.id, second.id);
    assert_eq!(rendered.markup, r#"<svg><circle r="2"/></svg>"#);
}
