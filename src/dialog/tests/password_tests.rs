use super::{Reply, scripted};

#[test]
fn test_password_returns_agreed_value() {
    let dialog = scripted([Reply::form("secret", "secret")]);
    let password = dialog.password("Root Password", None, None).unwrap();

    assert_eq!(password.as_deref(), Some("secret"));
    assert_eq!(dialog.runner().calls().len(), 1);
}

#[test]
fn test_password_retries_until_valid() {
    let dialog = scripted([
        Reply::form("", ""),
        Reply::exit(0), // empty password message box
        Reply::form("a", "b"),
        Reply::exit(0), // mismatch message box
        Reply::form("secret", "secret"),
    ]);

    let password = dialog.password("Root Password", None, None).unwrap();
    assert_eq!(password.as_deref(), Some("secret"));
    assert_eq!(dialog.runner().remaining(), 0);

    let calls = dialog.runner().calls();
    let boxes: Vec<_> = calls
        .iter()
        .filter(|c| c.directive().iter().any(|a| a == "--msgbox"))
        .map(|c| {
            let d = c.directive();
            (d[2].clone(), d[4].clone())
        })
        .collect();

    assert_eq!(
        boxes,
        [
            ("Error".to_string(), "Empty passwords are not allowed.".to_string()),
            ("Error".to_string(), "Passwords do not match.".to_string())
        ]
    );
}

#[test]
fn test_password_cancel_returns_none_without_retry() {
    let dialog = scripted([Reply {
        code: 1,
        stderr: String::new(),
        output: Some("a\nb\n".into()),
    }]);

    assert_eq!(dialog.password("Root Password", None, None).unwrap(), None);
    assert_eq!(dialog.runner().calls().len(), 1);
}

#[test]
fn test_password_form_arguments() {
    let dialog = scripted([Reply::form("pw", "pw")]);
    dialog
        .password("Root Password", Some("Password"), Some("Again"))
        .unwrap();

    let calls = dialog.runner().calls();
    let args = calls[0].directive();

    assert_eq!(args[0], "--insecure");
    assert_eq!(args[1], "--output-fd");
    assert!(args[2].parse::<i32>().unwrap() > 2, "fd {}", args[2]);
    assert_eq!(
        args[3..],
        [
            "--visit-items",
            "--passwordform",
            "Root Password",
            "10",
            "70",
            "0",
            "Password:",
            "1",
            "10",
            "",
            "0",
            "30",
            "25",
            "50",
            "Again:",
            "2",
            "10",
            "",
            "2",
            "30",
            "25",
            "50"
        ]
    );
}

#[test]
fn test_password_default_labels_are_translated() {
    let dialog = scripted([Reply::form("pw", "pw")]);
    dialog.password("Root Password", None, None).unwrap();

    let calls = dialog.runner().calls();
    let args = calls[0].directive();
    assert_eq!(args[9], "Password:");
    assert_eq!(args[17], "Confirm Password:");
}

#[test]
fn test_password_form_follows_dialog_language() {
    let dialog = scripted([Reply::form("a", "b"), Reply::exit(0), Reply::form("pw", "pw")])
        .with_language("zh");
    dialog.password("Root Password", None, None).unwrap();

    let calls = dialog.runner().calls();
    assert_eq!(calls[0].args[1], "确定");
    assert_eq!(calls[0].directive()[9], "密码:");
    assert_eq!(calls[0].directive()[17], "确认密码:");

    let error_box = calls[1].directive();
    assert_eq!(error_box[3], "--msgbox");
    assert_eq!(error_box[2], "错误");
    assert_eq!(error_box[4], "两次输入的密码不一致。");
}

#[test]
fn test_password_binds_navigation_keys() {
    let dialog = scripted([Reply::form("pw", "pw")]);
    dialog.password("Root Password", None, None).unwrap();

    let calls = dialog.runner().calls();
    let content = calls[0].dialogrc_content.as_deref().unwrap();
    assert!(content.contains("bindkey formfield TAB FORM_NEXT"));
    assert!(content.contains("bindkey formbox UP FORM_PREV"));
}

#[test]
fn test_password_never_uses_diagnostic_channel() {
    let dialog = scripted([Reply {
        code: 0,
        stderr: "leaked\nleaked\n".into(),
        output: Some("secret\nsecret\n".into()),
    }]);

    let password = dialog.password("Root Password", None, None).unwrap();
    assert_eq!(password.as_deref(), Some("secret"));
}

#[test]
fn test_password_temp_files_removed_on_success() {
    let dialog = scripted([Reply::form("a", "b"), Reply::exit(0), Reply::form("pw", "pw")]);
    dialog.password("Root Password", None, None).unwrap();

    let calls = dialog.runner().calls();
    let forms: Vec<_> = calls.iter().filter(|c| c.output_path.is_some()).collect();
    assert_eq!(forms.len(), 2);

    for call in forms {
        assert!(!call.dialogrc.as_ref().unwrap().exists());
        assert!(!call.output_path.as_ref().unwrap().exists());
    }
}

#[test]
fn test_password_temp_files_removed_on_cancel() {
    let dialog = scripted([Reply::exit(1)]);
    dialog.password("Root Password", None, None).unwrap();

    let calls = dialog.runner().calls();
    assert!(!calls[0].dialogrc.as_ref().unwrap().exists());
    assert!(!calls[0].output_path.as_ref().unwrap().exists());
}

#[test]
fn test_password_temp_files_removed_on_error() {
    // Nothing scripted for the error box, so showing it fails
    let dialog = scripted([Reply::form("", "")]);
    let err = dialog.password("Root Password", None, None).unwrap_err();
    assert!(err.to_string().contains("unexpected dialog invocation"));

    let calls = dialog.runner().calls();
    assert!(!calls[0].dialogrc.as_ref().unwrap().exists());
    assert!(!calls[0].output_path.as_ref().unwrap().exists());
}
