// Owner of every page module started at load. Modules register with an
// optional teardown; tearing the app down runs each available one once.

pub trait Teardown {
    fn teardown(&mut self);
}

impl<F: FnMut()> Teardown for F {
    fn teardown(&mut self) {
        self()
    }
}

pub struct PageModule {
    pub name: &'static str,
    teardown: Option<Box<dyn Teardown>>,
}

impl PageModule {
    pub fn has_teardown(&self) -> bool {
        self.teardown.is_some()
    }
}

#[derive(Default)]
pub struct PortfolioApp {
    modules: Vec<PageModule>,
}

impl PortfolioApp {
    pub fn new() -> Self {
        PortfolioApp::default()
    }

    pub fn register(&mut self, name: &'static str, teardown: Option<Box<dyn Teardown>>) {
        log::debug!("registered page module '{}'", name);
        self.modules.push(PageModule { name, teardown });
    }

    pub fn modules(&self) -> &[PageModule] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    // Runs every pending teardown once, in registration order. Returns how many ran.
    pub fn destroy(&mut self) -> usize {
        let mut ran = 0;
        for module in &mut self.modules {
            if let Some(mut teardown) = module.teardown.take() {
                teardown.teardown();
                ran += 1;
            }
        }
        ran
    }
}
