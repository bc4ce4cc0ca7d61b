//! Behaviour-driven tests for domain registration and lookup.

use std::cell::RefCell;

mod support;

use quodlibet_i18n::environment::LANGUAGE;
use quodlibet_i18n::{I18nConfig, I18nError, InitRequest, LocaleEnvironment, TranslationRegistry};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use support::step::{StepList, StepText};
use support::tree::LocaleTree;

struct RegistryWorld {
    tree: LocaleTree,
    languages: RefCell<String>,
    registry: RefCell<TranslationRegistry>,
    outcome: RefCell<Option<Result<(), I18nError>>>,
}

#[fixture]
fn world() -> RegistryWorld {
    let tree = LocaleTree::new();
    let registry = TranslationRegistry::new(I18nConfig {
        system_locale_dir: tree.system(),
        ..I18nConfig::default()
    });

    RegistryWorld {
        tree,
        languages: RefCell::new(String::new()),
        registry: RefCell::new(registry),
        outcome: RefCell::new(None),
    }
}

fn record(world: &RegistryWorld, domain: &str, local: bool) {
    let directory = local.then(|| world.tree.local());
    let outcome = world
        .registry
        .borrow_mut()
        .register(domain, directory.as_deref())
        .map(|_| ());
    world.outcome.borrow_mut().replace(outcome);
}

#[given("the message languages are {languages}")]
fn set_languages(world: &RegistryWorld, languages: StepText) {
    *world.languages.borrow_mut() = languages.0;
}

#[given("the system catalog for {language} translates {message} to {translation}")]
fn install_system(
    world: &RegistryWorld,
    language: StepText,
    message: StepText,
    translation: StepText,
) {
    world.tree.install(
        &world.tree.system(),
        &language.0,
        "quodlibet",
        &message.0,
        &translation.0,
    );
}

#[given("the local catalog for {language} translates {message} to {translation}")]
fn install_local(
    world: &RegistryWorld,
    language: StepText,
    message: StepText,
    translation: StepText,
) {
    world.tree.install(
        &world.tree.local(),
        &language.0,
        "quodlibet",
        &message.0,
        &translation.0,
    );
}

#[given("the registry is initialised")]
fn initialise(world: &RegistryWorld) {
    let environment = LocaleEnvironment::default().with_var(LANGUAGE, &world.languages.borrow());
    world
        .registry
        .borrow_mut()
        .initialise(InitRequest::new().environment(environment))
        .unwrap_or_else(|error| panic!("initialisation should succeed: {error}"));
}

#[when("the domain {domain} is registered")]
fn register(world: &RegistryWorld, domain: StepText) {
    record(world, &domain.0, false);
}

#[when("the domain {domain} is bound to the local directory")]
fn register_local(world: &RegistryWorld, domain: StepText) {
    record(world, &domain.0, true);
}

#[when("the debug wrapper is set to {marker}")]
fn set_debug_wrapper(world: &RegistryWorld, marker: StepText) {
    world
        .registry
        .borrow_mut()
        .set_debug_wrapper(Some(marker.0.as_str()));
}

#[then("the text for {message} is {expected}")]
fn assert_text(world: &RegistryWorld, message: StepText, expected: StepText) {
    let registry = world.registry.borrow();
    let message = message.0;

    assert_eq!(registry.gettext(&message), expected.0);
}

#[then("registration fails because the registry is not initialised")]
fn assert_not_initialised(world: &RegistryWorld) {
    let outcome = world.outcome.borrow();

    assert!(matches!(
        outcome.as_ref(),
        Some(Err(I18nError::NotInitialised { domain })) if domain == "quodlibet"
    ));
}

#[then("the available languages are {languages}")]
fn assert_languages(world: &RegistryWorld, languages: StepList) {
    assert_eq!(
        world.registry.borrow().available_languages("quodlibet"),
        languages.0
    );
}

#[scenario("tests/features/registry.feature", index = 0)]
fn scenario_source_fallback(world: RegistryWorld) {
    let _ = world;
}

#[scenario("tests/features/registry.feature", index = 1)]
fn scenario_installed_catalog(world: RegistryWorld) {
    let _ = world;
}

#[scenario("tests/features/registry.feature", index = 2)]
fn scenario_regional_fallback(world: RegistryWorld) {
    let _ = world;
}

#[scenario("tests/features/registry.feature", index = 3)]
fn scenario_english_preference(world: RegistryWorld) {
    let _ = world;
}

#[scenario("tests/features/registry.feature", index = 4)]
fn scenario_register_before_initialise(world: RegistryWorld) {
    let _ = world;
}

#[scenario("tests/features/registry.feature", index = 5)]
fn scenario_local_binding(world: RegistryWorld) {
    let _ = world;
}

#[scenario("tests/features/registry.feature", index = 6)]
fn scenario_debug_wrapper(world: RegistryWorld) {
    let _ = world;
}
