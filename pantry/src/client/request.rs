#[derive(Clone, Debug)]
/// A request to the client
pub enum ClientRequest {
    /// gets the public playlists of `user_id`, bypassing the cache if `force` is set
    GetPlaylists { user_id: String, force: bool },
}
