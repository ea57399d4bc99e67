use shared_kernel::integer_key;

integer_key!(MemberId);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}
