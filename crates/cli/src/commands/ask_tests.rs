use super::*;

#[test]
fn words_with_spaces_are_quoted() {
    let words = ["sort", "from", "/tmp/My Files", "to", "/tmp/out"].map(String::from);
    assert_eq!(
        join_words(&words),
        r#"sort from "/tmp/My Files" to /tmp/out"#
    );
}

#[test]
fn plain_words_are_joined_with_spaces() {
    let words = ["sync", "gmail"].map(String::from);
    assert_eq!(join_words(&words), "sync gmail");
}
