// SPDX-License-Identifier: GPL-3.0-only

use crate::app_settings::{self, TOAST_TIMER_INTERVAL_MS};
use crate::calculator::CalculatorOutput;
use crate::config::Config;
use crate::editor::{SaveDialog, TextBuffer};
use crate::error::{AppError, StoreError};
use crate::input::KeyEvent;
use crate::keyboard::{Keyboard, KeyboardOutput};
use crate::layout::{Language, LayoutRegistry};
use crate::pages::saved_texts::DELETE_CONFIRMATION;
use crate::pages::{
    AdminPage, ImportReport, LoginForm, Page, RegisterForm, SavedTextsPage, export_dir,
    export_saved_text, import_words,
};
use crate::panels::EmojiPanel;
use crate::renderer::theme::keyboard_theme;
use crate::renderer::{RendererMessage, ToastQueue, render_current_toast, render_keyboard, with_toast};
use crate::settings::{CosmicPreferences, LocalPreferences, load_or_create_settings};
use crate::store::{
    CalculatorHistoryEntry, DictionaryLanguage, FavoriteEmoji, KeyboardHeight, KeyboardSettings,
    RemoteStore, SavedText, Session, StoreStats, ThemePreference,
};
use cosmic::cosmic_config;
use cosmic::iced::keyboard as iced_keyboard;
use cosmic::iced::widget::text_editor;
use cosmic::iced::{Alignment, Event, Length, Subscription, event, time};
use cosmic::prelude::*;
use cosmic::widget;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Everything the application needs from `main`.
#[derive(Debug, Clone)]
pub struct Flags {
    pub store: Arc<dyn RemoteStore>,
    pub layouts: LayoutRegistry,
    pub config_handler: Option<cosmic_config::Config>,
    pub config: Config,
    /// Startup problems to show once the window is up
    pub startup_warnings: Vec<String>,
}

/// The application model stores app-specific state used to describe its interface and
/// drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    core: cosmic::Core,
    store: Arc<dyn RemoteStore>,
    /// Guest language and the rest of the cosmic_config entry.
    prefs: CosmicPreferences,
    page: Page,
    session: Option<Session>,
    settings: KeyboardSettings,
    keyboard: Keyboard,
    buffer: TextBuffer,
    /// Editor view of `buffer`; rebuilt after every keyboard output.
    editor: text_editor::Content,
    emoji: EmojiPanel,
    save_dialog: SaveDialog,
    login: LoginForm,
    register: RegisterForm,
    saved_texts: SavedTextsPage,
    admin: AdminPage,
    import_editor: text_editor::Content,
    toasts: ToastQueue,
}

/// Messages emitted by the application and its widgets.
#[derive(Debug, Clone)]
pub enum Message {
    /// Configuration has been updated.
    UpdateConfig(Config),
    Renderer(RendererMessage),
    /// Physical key events while the keyboard page is shown.
    KeyPressed(KeyEvent),
    KeyReleased(KeyEvent),
    ToastTick,
    Navigate(Page),

    // Editor
    EditorAction(text_editor::Action),
    OpenSaveDialog,
    CloseSaveDialog,
    SaveTitleChanged(String),
    SubmitSave,
    Saved(Result<SavedText, StoreError>),
    CopyText,
    ClearText,
    HistorySaved(Result<(), StoreError>),

    // Keyboard settings
    LanguagePersisted(Result<(), StoreError>),
    VibrationToggled(bool),
    KeyboardHeightSelected(KeyboardHeight),
    ThemeSelected(ThemePreference),
    SettingsSaved(Result<(), StoreError>),

    // Auth
    LoginEmailChanged(String),
    LoginPasswordChanged(String),
    SubmitLogin,
    LoginFinished(Result<Session, StoreError>),
    RegisterEmailChanged(String),
    RegisterPasswordChanged(String),
    RegisterConfirmChanged(String),
    SubmitRegister,
    RegisterFinished(Result<Session, StoreError>),
    /// Settings loaded for the user with the given id.
    SettingsLoaded(Uuid, Result<KeyboardSettings, StoreError>),
    FavoritesLoaded(Uuid, Result<Vec<FavoriteEmoji>, StoreError>),
    ContinueAsGuest,
    SignOut,

    // Saved texts
    SavedTextsLoaded(Uuid, Result<Vec<SavedText>, StoreError>),
    SelectText(Uuid),
    RequestDelete(Uuid),
    CancelDelete,
    ConfirmDelete,
    Deleted(Uuid, Result<(), StoreError>),
    ExportText(Uuid),
    Exported(Result<PathBuf, String>),

    // Admin
    StatsLoaded(Result<StoreStats, StoreError>),
    DictionaryLanguageSelected(DictionaryLanguage),
    ImportAction(text_editor::Action),
    SubmitImport,
    ImportFinished(ImportReport),
    RequestClearDictionary,
    CancelClearDictionary,
    ConfirmClearDictionary,
    DictionaryCleared(DictionaryLanguage, Result<usize, StoreError>),
}

/// Create a COSMIC application from the app model
impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    type Flags = Flags;

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = app_settings::APP_ID;

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    fn init(core: cosmic::Core, flags: Self::Flags) -> (Self, Task<cosmic::Action<Self::Message>>) {
        let prefs = CosmicPreferences::new(flags.config_handler, flags.config);
        let settings = guest_settings(&prefs);
        let mut keyboard = Keyboard::new(flags.layouts, settings.language);
        keyboard.set_vibration_enabled(settings.vibration_enabled);

        let mut toasts = ToastQueue::new();
        for warning in flags.startup_warnings {
            toasts.warning(warning);
        }

        let app = AppModel {
            core,
            store: flags.store,
            prefs,
            page: Page::Login,
            session: None,
            settings,
            keyboard,
            buffer: TextBuffer::new(),
            editor: text_editor::Content::new(),
            emoji: EmojiPanel::new(),
            save_dialog: SaveDialog::default(),
            login: LoginForm::default(),
            register: RegisterForm::default(),
            saved_texts: SavedTextsPage::default(),
            admin: AdminPage::default(),
            import_editor: text_editor::Content::new(),
            toasts,
        };

        tracing::info!("Tipkovnica started, keyboard language {}", app.settings.language);
        (app, Task::none())
    }

    fn view(&self) -> Element<'_, Self::Message> {
        let page = match self.page {
            Page::Login => self.view_login(),
            Page::Register => self.view_register(),
            Page::Keyboard => self.view_keyboard(),
            Page::SavedTexts => self.view_saved_texts(),
            Page::Admin => self.view_admin(),
        };

        let theme = keyboard_theme(self.settings.theme);
        let toast = render_current_toast(&self.toasts, &theme).map(|toast| toast.map(Message::Renderer));
        with_toast(page, toast)
    }

    fn subscription(&self) -> Subscription<Self::Message> {
        let mut subscriptions = vec![];

        // Watch for configuration changes
        let config_subscription = self
            .core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config));
        subscriptions.push(config_subscription);

        // Physical keys drive the keyboard only while it is on screen
        if self.page == Page::Keyboard {
            subscriptions.push(event::listen_with(|event, status, _id| {
                if status != event::Status::Ignored {
                    return None;
                }
                match event {
                    Event::Keyboard(iced_keyboard::Event::KeyPressed {
                        key, physical_key, ..
                    }) => Some(Message::KeyPressed(KeyEvent::from_iced(&key, &physical_key))),
                    Event::Keyboard(iced_keyboard::Event::KeyReleased {
                        key, physical_key, ..
                    }) => Some(Message::KeyReleased(KeyEvent::from_iced(&key, &physical_key))),
                    _ => None,
                }
            }));
        }

        if self.toasts.is_active() {
            subscriptions.push(
                time::every(Duration::from_millis(TOAST_TIMER_INTERVAL_MS)).map(|_| Message::ToastTick),
            );
        }

        Subscription::batch(subscriptions)
    }

    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        match message {
            Message::UpdateConfig(config) => {
                if config.layout_dir != self.prefs.config().layout_dir {
                    self.reload_layouts(&config);
                }
                self.prefs.replace_config(config);
            }
            Message::Renderer(message) => return self.handle_renderer(message),
            Message::KeyPressed(event) => {
                if let Some(output) = self.keyboard.key_down(&event) {
                    self.apply_output(&output);
                }
            }
            Message::KeyReleased(event) => self.keyboard.key_up(&event),
            Message::ToastTick => {
                self.toasts.tick();
            }
            Message::Navigate(page) => return self.navigate(page),

            Message::EditorAction(action) => {
                let is_edit = action.is_edit();
                self.editor.perform(action);
                if is_edit {
                    self.buffer.replace(content_text(&self.editor));
                }
            }
            Message::OpenSaveDialog => self.save_dialog.open(),
            Message::CloseSaveDialog => self.save_dialog.close(),
            Message::SaveTitleChanged(title) => self.save_dialog.set_title(title),
            Message::SubmitSave => {
                let submitted =
                    self.save_dialog
                        .submit(&self.buffer, self.keyboard.language(), self.session.as_ref());
                match submitted {
                    Ok((user_id, text)) => {
                        let store = Arc::clone(&self.store);
                        return Task::perform(
                            async move { store.insert_saved_text(user_id, text).await },
                            |result| cosmic::Action::App(Message::Saved(result)),
                        );
                    }
                    Err(err) => tracing::debug!("Save rejected: {}", err),
                }
            }
            Message::Saved(result) => {
                match &result {
                    Ok(text) => {
                        tracing::info!("Saved text '{}'", text.title);
                        self.toasts.info("Tekst je spremljen");
                    }
                    Err(err) => tracing::error!("Failed to save text: {}", err),
                }
                self.save_dialog.finish(&result);
            }
            Message::CopyText => match clipboard_contents(&self.buffer) {
                Some(text) => {
                    tracing::debug!("Copying {} bytes to clipboard", text.len());
                    self.toasts.info("Tekst je kopiran");
                    // The window owns the selection, so it outlives this update
                    return cosmic::iced::clipboard::write(text);
                }
                None => self.toasts.warning("Nema teksta za kopiranje"),
            },
            Message::ClearText => {
                self.buffer.clear();
                self.sync_editor();
            }
            Message::HistorySaved(result) => {
                if let Err(err) = result {
                    tracing::warn!("Failed to store calculator history: {}", err);
                }
            }

            Message::LanguagePersisted(result) => {
                if let Err(err) = result {
                    tracing::warn!("Failed to store keyboard language: {}", err);
                    self.toasts.warning(format!("Jezik nije spremljen: {}", err));
                }
            }
            Message::VibrationToggled(enabled) => {
                self.settings.vibration_enabled = enabled;
                self.keyboard.set_vibration_enabled(enabled);
                return self.save_settings();
            }
            Message::KeyboardHeightSelected(height) => {
                self.settings.keyboard_height = height;
                return self.save_settings();
            }
            Message::ThemeSelected(theme) => {
                self.settings.theme = theme;
                return self.save_settings();
            }
            Message::SettingsSaved(result) => {
                if let Err(err) = result {
                    tracing::warn!("Failed to store keyboard settings: {}", err);
                    self.toasts.warning(format!("Postavke nisu spremljene: {}", err));
                }
            }

            Message::LoginEmailChanged(email) => self.login.email = email,
            Message::LoginPasswordChanged(password) => self.login.password = password,
            Message::SubmitLogin => {
                if let Ok(creds) = self.login.submit() {
                    let store = Arc::clone(&self.store);
                    return Task::perform(
                        async move { store.sign_in(creds.email, creds.password).await },
                        |result| cosmic::Action::App(Message::LoginFinished(result)),
                    );
                }
            }
            Message::LoginFinished(result) => {
                self.login.finish(result.as_ref().err().map(ToString::to_string));
                if let Ok(session) = result {
                    return self.start_session(session);
                }
            }
            Message::RegisterEmailChanged(email) => self.register.email = email,
            Message::RegisterPasswordChanged(password) => self.register.password = password,
            Message::RegisterConfirmChanged(confirm) => self.register.confirm_password = confirm,
            Message::SubmitRegister => {
                if let Ok(creds) = self.register.submit() {
                    let store = Arc::clone(&self.store);
                    return Task::perform(
                        async move { store.sign_up(creds.email, creds.password).await },
                        |result| cosmic::Action::App(Message::RegisterFinished(result)),
                    );
                }
            }
            Message::RegisterFinished(result) => {
                self.register.finish(result.as_ref().err().map(ToString::to_string));
                if let Ok(session) = result {
                    return self.start_session(session);
                }
            }
            Message::SettingsLoaded(user_id, result) => {
                if !is_signed_in_as(self.session.as_ref(), user_id) {
                    tracing::debug!("Dropping settings loaded for a previous session");
                    return Task::none();
                }
                match result {
                    Ok(settings) => self.apply_settings(settings),
                    Err(err) => {
                        tracing::warn!("Failed to load keyboard settings: {}", err);
                        self.toasts.warning(format!("Postavke nisu učitane: {}", err));
                    }
                }
            }
            Message::FavoritesLoaded(user_id, result) => {
                if !is_signed_in_as(self.session.as_ref(), user_id) {
                    tracing::debug!("Dropping favorites loaded for a previous session");
                    return Task::none();
                }
                match result {
                    Ok(favorites) => self
                        .emoji
                        .apply_favorites(favorites.into_iter().map(|f| f.emoji).collect()),
                    Err(err) => tracing::warn!("Failed to load favorite emoji: {}", err),
                }
            }
            Message::ContinueAsGuest => return self.navigate(Page::Keyboard),
            Message::SignOut => {
                if let Some(session) = self.session.take() {
                    tracing::info!("Signed out {}", session.email);
                }
                self.emoji.reset_favorites();
                self.saved_texts = SavedTextsPage::default();
                self.admin = AdminPage::default();
                self.apply_settings(guest_settings(&self.prefs));
                return self.navigate(Page::Login);
            }

            Message::SavedTextsLoaded(user_id, result) => {
                if self.page == Page::SavedTexts && is_signed_in_as(self.session.as_ref(), user_id) {
                    match result {
                        Ok(texts) => self.saved_texts.set_texts(texts),
                        Err(err) => {
                            self.saved_texts.loading = false;
                            tracing::error!("Failed to load saved texts: {}", err);
                            self.toasts.error(err.to_string());
                        }
                    }
                }
            }
            Message::SelectText(id) => self.saved_texts.select(id),
            Message::RequestDelete(id) => self.saved_texts.request_delete(id),
            Message::CancelDelete => self.saved_texts.cancel_delete(),
            Message::ConfirmDelete => {
                if let (Some(id), Some(session)) = (self.saved_texts.confirm_delete(), &self.session) {
                    let store = Arc::clone(&self.store);
                    let user_id = session.user_id;
                    return Task::perform(
                        async move { store.delete_saved_text(user_id, id).await },
                        move |result| cosmic::Action::App(Message::Deleted(id, result)),
                    );
                }
            }
            Message::Deleted(id, result) => match result {
                Ok(()) => {
                    self.saved_texts.remove(id);
                    self.toasts.info("Tekst je obrisan");
                }
                Err(err) => {
                    tracing::error!("Failed to delete text {}: {}", id, err);
                    self.toasts.error(err.to_string());
                }
            },
            Message::ExportText(id) => {
                if let Some(text) = self.saved_texts.texts().iter().find(|t| t.id == id).cloned() {
                    return Task::perform(
                        async move {
                            export_saved_text(&text, &export_dir())
                                .await
                                .map_err(|err| err.to_string())
                        },
                        |result| cosmic::Action::App(Message::Exported(result)),
                    );
                }
            }
            Message::Exported(result) => match result {
                Ok(path) => self.toasts.info(format!("Spremljeno u {}", path.display())),
                Err(err) => {
                    tracing::error!("Export failed: {}", err);
                    self.toasts.error(format!("Preuzimanje nije uspjelo: {}", err));
                }
            },

            Message::StatsLoaded(result) => match result {
                Ok(stats) if self.page == Page::Admin => self.admin.stats = stats,
                Ok(_) => {}
                Err(err) => tracing::warn!("Failed to load stats: {}", err),
            },
            Message::DictionaryLanguageSelected(language) => self.admin.language = language,
            Message::ImportAction(action) => {
                self.import_editor.perform(action);
                self.admin.import_text = content_text(&self.import_editor);
            }
            Message::SubmitImport => {
                if let Some(entries) = self.admin.start_import() {
                    let store = Arc::clone(&self.store);
                    return Task::perform(
                        async move { import_words(store.as_ref(), entries).await },
                        |report| cosmic::Action::App(Message::ImportFinished(report)),
                    );
                }
            }
            Message::ImportFinished(report) => {
                self.admin.finish_import(report);
                self.import_editor = text_editor::Content::new();
                return self.load_stats();
            }
            Message::RequestClearDictionary => self.admin.request_clear(),
            Message::CancelClearDictionary => self.admin.cancel_clear(),
            Message::ConfirmClearDictionary => {
                if let Some(language) = self.admin.confirm_clear() {
                    let store = Arc::clone(&self.store);
                    return Task::perform(
                        async move { store.delete_dictionary_language(language).await },
                        move |result| {
                            cosmic::Action::App(Message::DictionaryCleared(language, result))
                        },
                    );
                }
            }
            Message::DictionaryCleared(language, result) => {
                if let Err(err) = &result {
                    tracing::error!("Failed to clear {} dictionary: {}", language, err);
                }
                self.admin.finish_clear(language, &result);
                if result.is_ok() {
                    return self.load_stats();
                }
            }
        }

        Task::none()
    }
}

impl AppModel {
    // ========================================================================
    // Keyboard
    // ========================================================================

    fn handle_renderer(&mut self, message: RendererMessage) -> Task<cosmic::Action<Message>> {
        match message {
            RendererMessage::KeyTapped(code) => {
                if let Some(output) = self.keyboard.tap_code(&code) {
                    self.apply_output(&output);
                }
            }
            RendererMessage::Backspace => {
                let output = self.keyboard.tap_backspace();
                self.apply_output(&output);
            }
            RendererMessage::Space => {
                let output = self.keyboard.tap_space();
                self.apply_output(&output);
            }
            RendererMessage::Enter => {
                let output = self.keyboard.tap_enter();
                self.apply_output(&output);
            }
            RendererMessage::ToggleCaps => {
                self.keyboard.toggle_caps_lock();
            }
            RendererMessage::CycleLanguage => {
                let language = self.keyboard.cycle_language();
                return self.persist_language(language);
            }
            RendererMessage::OpenCalculator => {
                self.keyboard.open_calculator();
            }
            RendererMessage::OpenSymbols => {
                self.keyboard.open_symbols();
            }
            RendererMessage::ClosePanel => self.keyboard.close_panel(),
            RendererMessage::Calculator(button) => match self.keyboard.tap_calculator(button) {
                Some(CalculatorOutput::Input(text)) => {
                    self.apply_output(&KeyboardOutput::Input(text));
                }
                Some(CalculatorOutput::Backspace) => self.apply_output(&KeyboardOutput::Backspace),
                Some(CalculatorOutput::Evaluated { expression, result }) => {
                    return self.record_history(expression, result);
                }
                None => {}
            },
            RendererMessage::ToggleCalculatorMode => {
                self.keyboard.toggle_calculator_mode();
            }
            RendererMessage::Literal(text) => {
                let output = self.keyboard.tap_literal(&text);
                self.apply_output(&output);
            }
            RendererMessage::ToggleEmojiGrid => {
                self.emoji.toggle_expanded();
            }
            RendererMessage::SelectEmojiCategory(category) => self.emoji.select_category(category),
            RendererMessage::DismissToast => self.toasts.dismiss(),
        }
        Task::none()
    }

    fn apply_output(&mut self, output: &KeyboardOutput) {
        self.buffer.apply(output);
        self.sync_editor();
    }

    /// Rebuilds the editor from the buffer with the cursor at the end.
    fn sync_editor(&mut self) {
        self.editor = text_editor::Content::with_text(self.buffer.as_str());
        self.editor
            .perform(text_editor::Action::Move(text_editor::Motion::DocumentEnd));
    }

    fn record_history(&self, expression: String, result: String) -> Task<cosmic::Action<Message>> {
        tracing::debug!("{} = {}", expression, result);
        let Some(session) = &self.session else {
            return Task::none();
        };
        let store = Arc::clone(&self.store);
        let user_id = session.user_id;
        let entry = CalculatorHistoryEntry { expression, result };
        Task::perform(
            async move { store.insert_calculator_history(user_id, entry).await },
            |result| cosmic::Action::App(Message::HistorySaved(result)),
        )
    }

    fn reload_layouts(&mut self, config: &Config) {
        match LayoutRegistry::load(config.layout_dir().as_deref()) {
            Ok(layouts) => {
                tracing::info!("Reloaded keyboard layouts");
                self.keyboard.set_layouts(layouts);
            }
            Err(err) => {
                tracing::error!("Failed to reload layouts: {}", err);
                self.toasts.error(format!("Raspored nije učitan: {}", err));
            }
        }
    }

    // ========================================================================
    // Settings and session
    // ========================================================================

    /// Stores the language remotely when signed in, locally otherwise.
    fn persist_language(&mut self, language: Language) -> Task<cosmic::Action<Message>> {
        self.settings.language = language;
        match &self.session {
            Some(session) => {
                let store = Arc::clone(&self.store);
                let user_id = session.user_id;
                Task::perform(
                    async move { store.update_language(user_id, language).await },
                    |result| cosmic::Action::App(Message::LanguagePersisted(result)),
                )
            }
            None => {
                if let Err(err) = self.prefs.store_language(language) {
                    tracing::warn!("Failed to store keyboard language locally: {}", err);
                    self.toasts.warning("Jezik nije spremljen");
                }
                Task::none()
            }
        }
    }

    fn save_settings(&self) -> Task<cosmic::Action<Message>> {
        let Some(session) = &self.session else {
            return Task::none();
        };
        let store = Arc::clone(&self.store);
        let user_id = session.user_id;
        let settings = self.settings;
        Task::perform(
            async move { store.save_settings(user_id, settings).await },
            |result| cosmic::Action::App(Message::SettingsSaved(result)),
        )
    }

    fn apply_settings(&mut self, settings: KeyboardSettings) {
        self.settings = settings;
        self.keyboard.set_language(settings.language);
        self.keyboard.set_vibration_enabled(settings.vibration_enabled);
    }

    fn start_session(&mut self, session: Session) -> Task<cosmic::Action<Message>> {
        tracing::info!("Signed in as {}", session.email);
        let store = Arc::clone(&self.store);
        let user_id = session.user_id;
        self.session = Some(session);

        let load_settings = Task::perform(
            async move { load_or_create_settings(store.as_ref(), user_id).await },
            move |result| cosmic::Action::App(Message::SettingsLoaded(user_id, result)),
        );
        Task::batch([load_settings, self.navigate(Page::Keyboard)])
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    fn navigate(&mut self, page: Page) -> Task<cosmic::Action<Message>> {
        if page.requires_session() && self.session.is_none() {
            self.toasts.warning(AppError::NotAuthenticated.to_string());
            return Task::none();
        }
        if self.page == Page::Keyboard && page != Page::Keyboard {
            self.keyboard.reset_transient();
        }
        self.page = page;

        match page {
            Page::Keyboard => self.load_favorites(),
            Page::SavedTexts => self.load_saved_texts(),
            Page::Admin => self.load_stats(),
            Page::Login | Page::Register => Task::none(),
        }
    }

    fn load_favorites(&self) -> Task<cosmic::Action<Message>> {
        let Some(session) = &self.session else {
            return Task::none();
        };
        let store = Arc::clone(&self.store);
        let user_id = session.user_id;
        Task::perform(
            async move { store.list_favorite_emojis(user_id).await },
            move |result| cosmic::Action::App(Message::FavoritesLoaded(user_id, result)),
        )
    }

    fn load_saved_texts(&mut self) -> Task<cosmic::Action<Message>> {
        let Some(session) = &self.session else {
            return Task::none();
        };
        self.saved_texts.loading = true;
        let store = Arc::clone(&self.store);
        let user_id = session.user_id;
        Task::perform(
            async move { store.list_saved_texts(user_id).await },
            move |result| cosmic::Action::App(Message::SavedTextsLoaded(user_id, result)),
        )
    }

    fn load_stats(&self) -> Task<cosmic::Action<Message>> {
        let store = Arc::clone(&self.store);
        Task::perform(async move { store.stats().await }, |result| {
            cosmic::Action::App(Message::StatsLoaded(result))
        })
    }

    // ========================================================================
    // Views
    // ========================================================================

    fn view_login(&self) -> Element<'_, Message> {
        let form = widget::column::column()
            .spacing(12)
            .max_width(360)
            .push(widget::text::title2("Prijava"))
            .push(
                widget::text_input("Email", &self.login.email)
                    .on_input(Message::LoginEmailChanged)
                    .on_submit(|_| Message::SubmitLogin),
            )
            .push(
                widget::secure_input("Lozinka", &self.login.password, None, true)
                    .on_input(Message::LoginPasswordChanged)
                    .on_submit(|_| Message::SubmitLogin),
            )
            .push_maybe(self.login.error.as_deref().map(widget::text::body))
            .push(
                widget::button::suggested(if self.login.loading { "Prijava..." } else { "Prijavi se" })
                    .on_press_maybe((!self.login.loading).then_some(Message::SubmitLogin)),
            )
            .push(
                widget::button::text("Nemate račun? Registrirajte se")
                    .on_press(Message::Navigate(Page::Register)),
            )
            .push(widget::button::standard("Nastavi kao gost").on_press(Message::ContinueAsGuest));

        centered(form.into())
    }

    fn view_register(&self) -> Element<'_, Message> {
        let form = widget::column::column()
            .spacing(12)
            .max_width(360)
            .push(widget::text::title2("Registracija"))
            .push(widget::text_input("Email", &self.register.email).on_input(Message::RegisterEmailChanged))
            .push(
                widget::secure_input("Lozinka", &self.register.password, None, true)
                    .on_input(Message::RegisterPasswordChanged),
            )
            .push(
                widget::secure_input("Potvrdite lozinku", &self.register.confirm_password, None, true)
                    .on_input(Message::RegisterConfirmChanged)
                    .on_submit(|_| Message::SubmitRegister),
            )
            .push_maybe(self.register.error.as_deref().map(widget::text::body))
            .push(
                widget::button::suggested(if self.register.loading {
                    "Registracija..."
                } else {
                    "Registriraj se"
                })
                .on_press_maybe((!self.register.loading).then_some(Message::SubmitRegister)),
            )
            .push(
                widget::button::text("Već imate račun? Prijavite se")
                    .on_press(Message::Navigate(Page::Login)),
            );

        centered(form.into())
    }

    fn view_header(&self, title: &'static str) -> Element<'_, Message> {
        let mut header = widget::row::row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(widget::text::title3(title))
            .push(widget::horizontal_space());

        if self.page != Page::Keyboard {
            header = header.push(
                widget::button::standard("Tipkovnica").on_press(Message::Navigate(Page::Keyboard)),
            );
        }

        match &self.session {
            Some(session) => header
                .push(widget::text::caption(session.email.clone()))
                .push_maybe((self.page != Page::SavedTexts).then(|| {
                    widget::button::standard("Spremljeni tekstovi")
                        .on_press(Message::Navigate(Page::SavedTexts))
                }))
                .push_maybe((self.page != Page::Admin).then(|| {
                    widget::button::standard("Admin").on_press(Message::Navigate(Page::Admin))
                }))
                .push(widget::button::text("Odjava").on_press(Message::SignOut))
                .into(),
            None => header
                .push(widget::text::caption("Gost"))
                .push(widget::button::suggested("Prijava").on_press(Message::Navigate(Page::Login)))
                .into(),
        }
    }

    fn view_keyboard(&self) -> Element<'_, Message> {
        let stats = self.buffer.stats();
        let theme = keyboard_theme(self.settings.theme);

        let settings_row = widget::row::row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(
                widget::toggler(self.settings.vibration_enabled)
                    .label("Vibracija")
                    .on_toggle(Message::VibrationToggled),
            )
            .push(widget::horizontal_space())
            .push(height_button("S", KeyboardHeight::Small, self.settings.keyboard_height))
            .push(height_button("M", KeyboardHeight::Medium, self.settings.keyboard_height))
            .push(height_button("L", KeyboardHeight::Large, self.settings.keyboard_height))
            .push(match self.settings.theme {
                ThemePreference::Light => widget::button::standard("Tamna tema")
                    .on_press(Message::ThemeSelected(ThemePreference::Dark)),
                ThemePreference::Dark => widget::button::standard("Svijetla tema")
                    .on_press(Message::ThemeSelected(ThemePreference::Light)),
            });

        let editor = text_editor(&self.editor)
            .placeholder("Počnite tipkati...")
            .on_action(Message::EditorAction)
            .height(Length::Fill);

        let actions = widget::row::row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(widget::text::caption(format!(
                "Znakova: {}, Riječi: {}",
                stats.chars, stats.words
            )))
            .push(widget::horizontal_space())
            .push(widget::button::suggested("Spremi").on_press(Message::OpenSaveDialog))
            .push(widget::button::standard("Kopiraj").on_press(Message::CopyText))
            .push(widget::button::destructive("Obriši").on_press(Message::ClearText));

        let keyboard = render_keyboard(
            &self.keyboard,
            &self.emoji,
            &theme,
            self.settings.keyboard_height.key_height(),
        )
        .map(Message::Renderer);

        widget::column::column()
            .spacing(12)
            .padding(16)
            .push(self.view_header("Tipkovnica"))
            .push(settings_row)
            .push(editor)
            .push(actions)
            .push_maybe(self.save_dialog.is_open().then(|| self.view_save_dialog()))
            .push(keyboard)
            .into()
    }

    fn view_save_dialog(&self) -> Element<'_, Message> {
        let saving = self.save_dialog.is_saving();
        widget::column::column()
            .spacing(8)
            .push(widget::text::heading("Spremi tekst"))
            .push(
                widget::text_input("Naslov (opcionalno)", self.save_dialog.title())
                    .on_input(Message::SaveTitleChanged)
                    .on_submit(|_| Message::SubmitSave),
            )
            .push_maybe(self.save_dialog.error().map(widget::text::body))
            .push(
                widget::row::row()
                    .spacing(8)
                    .push(
                        widget::button::suggested(if saving { "Spremanje..." } else { "Spremi" })
                            .on_press_maybe((!saving).then_some(Message::SubmitSave)),
                    )
                    .push(widget::button::standard("Odustani").on_press(Message::CloseSaveDialog)),
            )
            .into()
    }

    fn view_saved_texts(&self) -> Element<'_, Message> {
        let mut list = widget::column::column().spacing(6);
        if self.saved_texts.loading {
            list = list.push(widget::text::body("Učitavanje..."));
        } else if self.saved_texts.texts().is_empty() {
            list = list.push(widget::text::body("Nemate spremljenih tekstova"));
        }
        for text in self.saved_texts.texts() {
            let label = format!(
                "{}  ·  {}  ·  {} znakova",
                text.title,
                text.created_at.format("%d.%m.%Y. %H:%M"),
                text.char_count
            );
            list = list.push(
                widget::button::text(label)
                    .width(Length::Fill)
                    .on_press(Message::SelectText(text.id)),
            );
        }

        let preview: Element<'_, Message> = match self.saved_texts.selected() {
            Some(text) => {
                let confirm = (self.saved_texts.pending_delete() == Some(text.id)).then(|| {
                    widget::row::row()
                        .spacing(8)
                        .align_y(Alignment::Center)
                        .push(widget::text::body(DELETE_CONFIRMATION))
                        .push(widget::button::destructive("Da").on_press(Message::ConfirmDelete))
                        .push(widget::button::standard("Ne").on_press(Message::CancelDelete))
                });
                widget::column::column()
                    .spacing(8)
                    .push(widget::text::title4(text.title.clone()))
                    .push(widget::text::caption(format!(
                        "{} · {} znakova · {} riječi",
                        text.language.label(),
                        text.char_count,
                        text.word_count
                    )))
                    .push(widget::scrollable(widget::text::body(text.content.clone())).height(Length::Fill))
                    .push(
                        widget::row::row()
                            .spacing(8)
                            .push(widget::button::standard("Preuzmi").on_press(Message::ExportText(text.id)))
                            .push(widget::button::destructive("Obriši").on_press(Message::RequestDelete(text.id))),
                    )
                    .push_maybe(confirm)
                    .into()
            }
            None => widget::text::body("Odaberite tekst za pregled").into(),
        };

        widget::column::column()
            .spacing(12)
            .padding(16)
            .push(self.view_header("Spremljeni tekstovi"))
            .push(
                widget::row::row()
                    .spacing(16)
                    .push(widget::scrollable(list).width(Length::FillPortion(1)))
                    .push(widget::container(preview).width(Length::FillPortion(2))),
            )
            .into()
    }

    fn view_admin(&self) -> Element<'_, Message> {
        let stats = self.admin.stats;
        let stats_row = widget::row::row()
            .spacing(24)
            .push(widget::text::body(format!("Korisnici: {}", stats.users)))
            .push(widget::text::body(format!("Tekstovi: {}", stats.texts)))
            .push(widget::text::body(format!("Riječi u rječniku: {}", stats.dictionary_words)));

        let languages = DictionaryLanguage::ALL.into_iter().fold(
            widget::row::row().spacing(8),
            |row, language| {
                let button = if language == self.admin.language {
                    widget::button::suggested(language.as_str())
                } else {
                    widget::button::standard(language.as_str())
                };
                row.push(button.on_press(Message::DictionaryLanguageSelected(language)))
            },
        );

        let import = text_editor(&self.import_editor)
            .placeholder("Jedna riječ po retku")
            .on_action(Message::ImportAction)
            .height(Length::Fixed(200.0));

        let importing = self.admin.importing;
        let actions = widget::row::row()
            .spacing(8)
            .push(
                widget::button::suggested(if importing { "Import..." } else { "Importiraj" })
                    .on_press_maybe((!importing).then_some(Message::SubmitImport)),
            )
            .push(
                widget::button::destructive("Obriši sve riječi")
                    .on_press(Message::RequestClearDictionary),
            );

        let confirm = self.admin.is_confirming_clear().then(|| {
            widget::row::row()
                .spacing(8)
                .align_y(Alignment::Center)
                .push(widget::text::body(self.admin.clear_confirmation()))
                .push(widget::button::destructive("Da").on_press(Message::ConfirmClearDictionary))
                .push(widget::button::standard("Ne").on_press(Message::CancelClearDictionary))
        });

        widget::column::column()
            .spacing(12)
            .padding(16)
            .push(self.view_header("Admin"))
            .push(stats_row)
            .push(widget::text::heading("Import rječnika"))
            .push(languages)
            .push(import)
            .push(actions)
            .push_maybe(confirm)
            .push_maybe(self.admin.message.as_deref().map(widget::text::body))
            .push(widget::text::caption(format!(
                "Import radi u batch-evima od {} riječi",
                app_settings::IMPORT_BATCH_SIZE
            )))
            .into()
    }
}

/// Settings used without a session: defaults plus the locally stored
/// language.
fn guest_settings(prefs: &dyn LocalPreferences) -> KeyboardSettings {
    KeyboardSettings {
        language: prefs.language().unwrap_or_default(),
        ..KeyboardSettings::default()
    }
}

/// Text of an editor.
///
/// Some editor versions end the text with a newline per line instead of
/// between lines; a text of `n` lines has exactly `n - 1` separators.
fn content_text(content: &text_editor::Content) -> String {
    let mut text = content.text();
    if text.matches('\n').count() >= content.line_count() && text.ends_with('\n') {
        text.pop();
    }
    text
}

/// Returns `true` if `user_id` is the signed-in user.
fn is_signed_in_as(session: Option<&Session>, user_id: Uuid) -> bool {
    session.is_some_and(|session| session.user_id == user_id)
}

/// Text to put on the clipboard. An empty buffer copies nothing.
fn clipboard_contents(buffer: &TextBuffer) -> Option<String> {
    (!buffer.is_empty()).then(|| buffer.as_str().to_string())
}

fn height_button<'a>(
    label: &'static str,
    height: KeyboardHeight,
    current: KeyboardHeight,
) -> Element<'a, Message> {
    let button = if height == current {
        widget::button::suggested(label)
    } else {
        widget::button::standard(label)
    };
    button.on_press(Message::KeyboardHeightSelected(height)).into()
}

fn centered(content: Element<'_, Message>) -> Element<'_, Message> {
    widget::container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
