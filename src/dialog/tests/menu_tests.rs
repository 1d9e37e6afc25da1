use std::cell::Cell;

use super::{Reply, scripted, strings};
use crate::dialog::MenuItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Install,
    Shell,
    Reboot,
}

#[test]
fn test_menu_arguments_number_items_from_one() {
    let dialog = scripted([Reply::exit(1)]);
    let result = dialog
        .menu(
            "Console Setup",
            vec![
                MenuItem::new("Install/Upgrade", || Ok(Some(Action::Install))),
                MenuItem::new("Shell", || Ok(Some(Action::Shell))),
            ],
        )
        .unwrap();

    assert_eq!(result, None);
    assert_eq!(
        dialog.runner().calls()[0].directive(),
        strings(&[
            "--clear",
            "--title",
            "Console Setup",
            "--menu",
            "",
            "12",
            "73",
            "6",
            "1",
            "Install/Upgrade",
            "2",
            "Shell"
        ])
    );
}

#[test]
fn test_menu_resolves_one_based_index_and_runs_handler_once() {
    let runs = [Cell::new(0), Cell::new(0), Cell::new(0)];
    let dialog = scripted([Reply::stderr(0, "3")]);

    let result = dialog
        .menu(
            "Console Setup",
            vec![
                MenuItem::new("Install/Upgrade", || {
                    runs[0].set(runs[0].get() + 1);
                    Ok(Some(Action::Install))
                }),
                MenuItem::new("Shell", || {
                    runs[1].set(runs[1].get() + 1);
                    Ok(Some(Action::Shell))
                }),
                MenuItem::new("Reboot", || {
                    runs[2].set(runs[2].get() + 1);
                    Ok(Some(Action::Reboot))
                }),
            ],
        )
        .unwrap();

    assert_eq!(result, Some(Action::Reboot));
    assert_eq!(runs.iter().map(Cell::get).collect::<Vec<_>>(), [0, 0, 1]);
}

#[test]
fn test_menu_cancel_runs_no_handler() {
    let ran = Cell::new(false);
    let dialog = scripted([Reply::stderr(255, "1")]);

    let result = dialog
        .menu(
            "Console Setup",
            vec![MenuItem::new("Shell", || {
                ran.set(true);
                Ok(Some(Action::Shell))
            })],
        )
        .unwrap();

    assert_eq!(result, None);
    assert!(!ran.get());
}

#[test]
fn test_menu_handler_can_open_nested_menu() {
    let dialog = scripted([Reply::stderr(0, "2\n"), Reply::stderr(0, "1\n")]);

    let result = dialog
        .menu(
            "Console Setup",
            vec![
                MenuItem::new("Install/Upgrade", || Ok(Some(Action::Install))),
                MenuItem::new("Advanced", || {
                    dialog.menu(
                        "Advanced",
                        vec![
                            MenuItem::new("Shell", || Ok(Some(Action::Shell))),
                            MenuItem::new("Reboot", || Ok(Some(Action::Reboot))),
                        ],
                    )
                }),
            ],
        )
        .unwrap();

    assert_eq!(result, Some(Action::Shell));

    let calls = dialog.runner().calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].directive()[2], "Advanced");
}

#[test]
fn test_menu_handler_result_is_returned_as_is() {
    let dialog = scripted([Reply::stderr(0, "1")]);
    let result: Option<Action> = dialog
        .menu("Console Setup", vec![MenuItem::new("Back", || Ok(None))])
        .unwrap();

    assert_eq!(result, None);
}

#[test]
fn test_menu_rejects_non_numeric_payload() {
    let dialog = scripted([Reply::stderr(0, "Shell")]);
    let err = dialog
        .menu("Console Setup", vec![MenuItem::new("Shell", || Ok(Some(Action::Shell)))])
        .unwrap_err();

    assert!(err.to_string().contains("Unexpected menu selection"));
}

#[test]
fn test_menu_rejects_out_of_range_index() {
    for payload in ["0", "3"] {
        let dialog = scripted([Reply::stderr(0, payload)]);
        let err = dialog
            .menu(
                "Console Setup",
                vec![
                    MenuItem::new("Install/Upgrade", || Ok(Some(Action::Install))),
                    MenuItem::new("Shell", || Ok(Some(Action::Shell))),
                ],
            )
            .unwrap_err();

        assert!(err.to_string().contains("outside 1..=2"), "{payload}: {err}");
    }
}
