/// Modal dialog as seen by a controller. Rendering belongs to the caller.
pub trait DialogHandle: Send + Sync {
    fn open(&mut self);
    fn close(&mut self);
    fn set_auto_closable(&mut self, auto_closable: bool);
    fn is_open(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    open: bool,
    auto_closable: bool,
}

impl Default for Dialog {
    fn default() -> Self {
        Self {
            open: false,
            auto_closable: true,
        }
    }
}

impl Dialog {
    pub fn auto_closable(&self) -> bool {
        self.auto_closable
    }
}

impl DialogHandle for Dialog {
    fn open(&mut self) {
        self.open = true;
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn set_auto_closable(&mut self, auto_closable: bool) {
        self.auto_closable = auto_closable;
    }

    fn is_open(&self) -> bool {
        self.open
    }
}
