/// Страницы, между которыми может переключаться пользователь.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Route {
    #[display(fmt = "#employee/bills")]
    Bills,

    #[display(fmt = "#employee/bill/new")]
    NewBill,
}

/// Функция навигации, которую предоставляет внешний роутер.
pub type OnNavigate = Box<dyn Fn(Route) + Send + Sync>;
